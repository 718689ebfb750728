use std::time::Duration;

use anyhow::Context;
use inv2http::{config::CollectorConfig, http_wrapper::HttpWrapper};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

pub struct ReqwestWrapper {
    client: Client,
}

impl HttpWrapper for ReqwestWrapper {
    fn post_json(&mut self, url: &str, body: Vec<u8>) -> anyhow::Result<u16> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .with_context(|| format!("POST {url}"))?;
        Ok(response.status().as_u16())
    }

    fn new(config: &CollectorConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout))
            .user_agent(concat!("inv-http-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("unable to build HTTP client")?;
        Ok(Self { client })
    }
}
