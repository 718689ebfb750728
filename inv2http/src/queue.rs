//! FIFO hand-off of samples from the acquisition loop to the relay loop.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::sample::Sample;

/// Unbounded queue created once at startup and split between one producer and one consumer.
pub struct SampleQueue {
    sender: SampleSender,
    receiver: SampleReceiver,
}

impl SampleQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            sender: SampleSender(tx),
            receiver: SampleReceiver(rx),
        }
    }

    pub fn split(self) -> (SampleSender, SampleReceiver) {
        (self.sender, self.receiver)
    }
}

impl Default for SampleQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct SampleSender(Sender<Sample>);

impl SampleSender {
    pub fn push(&self, sample: Sample) {
        // fails only once the relay side has been dropped
        let _ = self.0.send(sample);
    }
}

pub struct SampleReceiver(Receiver<Sample>);

impl SampleReceiver {
    /// Takes every sample queued right now without waiting for more. Samples pushed while
    /// draining are left for the next call.
    pub fn drain(&self) -> Vec<Sample> {
        let queued = self.0.len();
        self.0.try_iter().take(queued).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
