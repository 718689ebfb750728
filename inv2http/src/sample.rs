use chrono::{DateTime, Local};
use serde_derive::Serialize;

/// One decoded telemetry reading, serialised as one element of the collector payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub ts: DateTime<Local>,
    pub dc_voltage: f64,
    pub dc_current: f64,
    pub ac_voltage: f64,
    pub ac_current: f64,
    pub power: f64,
    pub frequency: f64,
}
