use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

/// Requests a cooperative stop of every loop holding a matching [`StopToken`].
///
/// Stopping drops the only sender of a never-used channel, so every receiver observes
/// disconnection at once.
#[derive(Clone)]
pub struct StopHandle {
    sender: Arc<Mutex<Option<Sender<()>>>>,
}

#[derive(Clone)]
pub struct StopToken {
    receiver: Receiver<()>,
}

pub fn stop_pair() -> (StopHandle, StopToken) {
    let (tx, rx) = bounded(0);
    (
        StopHandle {
            sender: Arc::new(Mutex::new(Some(tx))),
        },
        StopToken { receiver: rx },
    )
}

impl StopHandle {
    /// Idempotent; returns `true` only for the call that actually requested the stop.
    pub fn stop(&self) -> bool {
        let mut sender = match self.sender.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sender.take().is_some()
    }
}

impl StopToken {
    pub fn is_stopped(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleeps for `interval`, waking early if a stop is requested. Returns `true` when stopped.
    pub fn wait(&self, interval: Duration) -> bool {
        match self.receiver.recv_timeout(interval) {
            Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) | Ok(()) => false,
        }
    }
}
