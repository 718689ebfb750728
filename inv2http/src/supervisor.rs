use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{error, info};

use crate::acquisition::Acquisition;
use crate::collector::Collector;
use crate::error::Result;
use crate::inverter::Inverter;
use crate::queue::SampleQueue;
use crate::relay::Relay;
use crate::shutdown::{stop_pair, StopHandle};

/// Owns the queue, the stop signal and the two loop threads.
pub struct Supervisor {
    stop: StopHandle,
    threads: Vec<JoinHandle<()>>,
}

impl Supervisor {
    /// Launches the acquisition and relay loops, each on its own thread.
    pub fn start<C>(inverter: Inverter, collector: C, interval: Duration) -> Result<Self>
    where
        C: Collector + Send + 'static,
    {
        info!("START");
        let (stop, token) = stop_pair();
        let (sender, receiver) = SampleQueue::new().split();

        let acquisition = Acquisition::new(inverter, sender, interval, token.clone());
        let relay = Relay::new(collector, receiver, interval, token);

        let mut supervisor = Self {
            stop,
            threads: Vec::with_capacity(2),
        };
        supervisor.spawn("acquisition", move || acquisition.run())?;
        supervisor.spawn("relay", move || relay.run())?;
        Ok(supervisor)
    }

    fn spawn<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        match thread::Builder::new().name(name.to_string()).spawn(f) {
            Ok(handle) => {
                self.threads.push(handle);
                Ok(())
            }
            Err(e) => {
                self.abort();
                Err(e.into())
            }
        }
    }

    /// Stops and joins whichever loops already started.
    fn abort(&mut self) {
        self.stop();
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                error!("loop thread panicked during abort");
            }
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        if self.stop.stop() {
            info!("STOP");
        }
    }

    /// Blocks until both loops have observed the stop request and exited.
    pub fn join(self) {
        info!("JOIN");
        for handle in self.threads {
            let name = handle.thread().name().unwrap_or("loop").to_string();
            if handle.join().is_err() {
                error!("{name} thread panicked");
            }
        }
    }
}
