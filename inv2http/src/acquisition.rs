use std::time::Duration;

use log::{debug, info, warn};

use crate::error::Result;
use crate::inverter::Inverter;
use crate::protocol::{build_request, parse_response};
use crate::queue::SampleSender;
use crate::sample::Sample;
use crate::shutdown::StopToken;

/// Polls the inverter once per interval and queues every sample it manages to decode.
pub struct Acquisition {
    inverter: Inverter,
    queue: SampleSender,
    interval: Duration,
    stop: StopToken,
}

impl Acquisition {
    pub fn new(inverter: Inverter, queue: SampleSender, interval: Duration, stop: StopToken) -> Self {
        Self {
            inverter,
            queue,
            interval,
            stop,
        }
    }

    pub fn poll(&mut self) -> Result<Sample> {
        let request = build_request();
        debug!("Request: {request}");

        let response = self.inverter.fetch(&request)?;
        debug!("Response: {response}");

        let sample = parse_response(&response)?;
        debug!("Sample: {sample:?}");
        Ok(sample)
    }

    /// One poll; a failure skips the cycle and is only logged.
    pub fn run_cycle(&mut self) {
        match self.poll() {
            Ok(sample) => self.queue.push(sample),
            Err(e) => warn!("Inverter poll failed: {e}"),
        }
    }

    pub fn run(mut self) {
        info!("Acquisition loop running");
        while !self.stop.is_stopped() {
            self.run_cycle();
            if self.stop.wait(self.interval) {
                break;
            }
        }
        info!("Acquisition loop stopped");
    }
}
