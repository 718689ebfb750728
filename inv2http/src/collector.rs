use log::debug;

use crate::config::CollectorConfig;
use crate::error::{Error, Result};
use crate::http_wrapper::HttpWrapper;
use crate::sample::Sample;

/// Destination of relayed batches.
pub trait Collector {
    fn publish(&mut self, batch: &[Sample]) -> Result<()>;
}

/// Posts each batch as one JSON array to the collector endpoint.
pub struct HttpCollector<HTTP: HttpWrapper> {
    client: HTTP,
    url: String,
}

impl<HTTP: HttpWrapper> HttpCollector<HTTP> {
    pub fn new(config: &CollectorConfig) -> anyhow::Result<Self> {
        Ok(Self::with_client(HTTP::new(config)?, &config.url))
    }

    pub fn with_client(client: HTTP, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub fn client(&self) -> &HTTP {
        &self.client
    }
}

impl<HTTP: HttpWrapper> Collector for HttpCollector<HTTP> {
    fn publish(&mut self, batch: &[Sample]) -> Result<()> {
        let body = serde_json::to_vec(batch)
            .map_err(|e| Error::DeliveryFailure(format!("cannot serialise batch: {e}")))?;
        debug!("Posting {} samples to {}", batch.len(), self.url);

        let status = self
            .client
            .post_json(&self.url, body)
            .map_err(|e| Error::DeliveryFailure(format!("{e:#}")))?;
        if status != 200 {
            return Err(Error::DeliveryFailure(format!(
                "{} answered HTTP {status}",
                self.url
            )));
        }
        Ok(())
    }
}
