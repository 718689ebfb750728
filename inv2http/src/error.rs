use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abandon a single acquisition or relay cycle.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connection to inverter at {addr} timed out after {}ms", .timeout.as_millis())]
    ConnectTimeout { addr: SocketAddr, timeout: Duration },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("inverter response is not valid text ({0}): {:?}", String::from_utf8_lossy(.0.as_bytes()))]
    Decode(#[from] std::string::FromUtf8Error),
    #[error("malformed frame ({reason}): {frame:?}")]
    MalformedFrame { reason: String, frame: String },
    #[error("frame lacks required field {field}: {frame:?}")]
    MissingField { field: &'static str, frame: String },
    #[error("delivery to collector failed: {0}")]
    DeliveryFailure(String),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>, frame: &str) -> Self {
        Error::MalformedFrame {
            reason: reason.into(),
            frame: frame.to_string(),
        }
    }
}
