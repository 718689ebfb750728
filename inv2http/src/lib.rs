// externally visible interfaces
pub mod acquisition;
pub mod collector;
pub mod config;
pub mod error;
pub mod http_wrapper;
pub mod inverter;
pub mod protocol;
pub mod queue;
pub mod relay;
pub mod sample;
pub mod shutdown;
pub mod supervisor;

pub use error::{Error, Result};
