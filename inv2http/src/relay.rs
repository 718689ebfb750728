use std::time::Duration;

use log::{debug, info, warn};

use crate::collector::Collector;
use crate::queue::SampleReceiver;
use crate::shutdown::StopToken;

/// Forwards everything queued since the previous cycle to the collector in one batch.
///
/// Delivery is at most once: a failed batch is logged and dropped.
pub struct Relay<C: Collector> {
    collector: C,
    queue: SampleReceiver,
    interval: Duration,
    stop: StopToken,
}

impl<C: Collector> Relay<C> {
    pub fn new(collector: C, queue: SampleReceiver, interval: Duration, stop: StopToken) -> Self {
        Self {
            collector,
            queue,
            interval,
            stop,
        }
    }

    /// Returns the number of samples delivered this cycle.
    pub fn run_cycle(&mut self) -> usize {
        let batch = self.queue.drain();
        if batch.is_empty() {
            return 0;
        }

        match self.collector.publish(&batch) {
            Ok(()) => {
                debug!("Relayed {} samples", batch.len());
                batch.len()
            }
            Err(e) => {
                warn!("Discarding {} samples: {e}", batch.len());
                0
            }
        }
    }

    pub fn run(mut self) {
        info!("Relay loop running");
        while !self.stop.is_stopped() {
            self.run_cycle();
            if self.stop.wait(self.interval) {
                break;
            }
        }
        info!("Relay loop stopped");
    }

    pub fn into_collector(self) -> C {
        self.collector
    }
}
