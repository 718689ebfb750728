use crate::config::CollectorConfig;

pub trait HttpWrapper {
    // Decouples library code from a concrete HTTP client. The calling binary wraps its
    // client of choice in a new type implementing this trait; tests wrap a recorder.

    /// Posts `body` as `application/json` and returns the response status code.
    fn post_json(&mut self, url: &str, body: Vec<u8>) -> anyhow::Result<u16>;

    fn new(config: &CollectorConfig) -> anyhow::Result<Self>
    where
        Self: Sized;
}
