//! Text framing used by the inverter.
//!
//! A request looks like `{FB;01;3A|64:UDC;IDC;...|0E1D}`: three hex byte pairs, the query
//! tagged with `64:`, and a rolling checksum over everything before it. Responses use the
//! same framing with `KEY=HEXVAL` items in place of the bare query fields.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Local};

use crate::error::{Error, Result};
use crate::sample::Sample;

/// Fields requested from the inverter on every poll, in wire order.
pub const QUERY_FIELDS: [&str; 10] = [
    "UDC", "IDC", "UL1", "IL1", "PAC", "PRL", "TKK", "TNF", "KDY", "KLD",
];

const FRAME_START: u8 = 0xFB;
const FRAME_VERSION: u8 = 0x01;
// fixed protocol offsets around the query
const LENGTH_HEAD: usize = 13;
const LENGTH_TAIL: usize = 6;
const QUERY_TAG: &str = "64:";

/// Required response fields and their raw-value divisors.
const SCALES: [(&str, f64); 6] = [
    ("UDC", 10.),
    ("IDC", 100.),
    ("UL1", 10.),
    ("IL1", 100.),
    ("PAC", 10.),
    ("TNF", 100.),
];

/// An encoded request, ready to be written to the socket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestFrame(String);

impl RequestFrame {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for RequestFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn build_request() -> RequestFrame {
    let query = QUERY_FIELDS.join(";");
    let length = LENGTH_HEAD + query.len() + LENGTH_TAIL;
    let body = format!("{FRAME_START:02X};{FRAME_VERSION:02X};{length:02X}|{QUERY_TAG}{query}|");
    let checksum = checksum16(&body);
    RequestFrame(format!("{{{body}{checksum:04X}}}"))
}

/// Rolling sum of character codes, reduced modulo `0xFFFF` after every addition.
pub fn checksum16(text: &str) -> u16 {
    let sum = text
        .chars()
        .fold(0u32, |acc, c| (acc + u32::from(c)) % 0xFFFF);
    // always below 0xFFFF after the reduction
    sum as u16
}

/// Decodes a response frame into a sample stamped with the current local time.
pub fn parse_response(raw: &str) -> Result<Sample> {
    parse_response_at(raw, Local::now())
}

pub fn parse_response_at(raw: &str, ts: DateTime<Local>) -> Result<Sample> {
    let readings = parse_readings(raw)?;

    let mut values = [0f64; SCALES.len()];
    for (value, (field, divisor)) in values.iter_mut().zip(SCALES) {
        let reading = readings.get(field).ok_or_else(|| Error::MissingField {
            field,
            frame: raw.to_string(),
        })?;
        *value = *reading as f64 / divisor;
    }
    let [dc_voltage, dc_current, ac_voltage, ac_current, power, frequency] = values;

    Ok(Sample {
        ts,
        dc_voltage,
        dc_current,
        ac_voltage,
        ac_current,
        power,
        frequency,
    })
}

/// Splits the data segment of a frame into raw readings. A repeated key keeps its last value.
fn parse_readings(raw: &str) -> Result<HashMap<&str, u64>> {
    let text = raw.trim();
    if !text.starts_with('{') || !text.ends_with('}') {
        return Err(Error::malformed("missing braces", raw));
    }

    let data = text
        .split('|')
        .nth(1)
        .ok_or_else(|| Error::malformed("no data segment", raw))?;
    // drop the query tag, whatever it is
    let items = match data.char_indices().nth(QUERY_TAG.len()) {
        Some((offset, _)) => &data[offset..],
        None => "",
    };

    let mut readings = HashMap::new();
    for item in items.split(';') {
        let mut parts = item.split('=');
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => return Err(Error::malformed(format!("bad item {item:?}"), raw)),
        };
        let value = u64::from_str_radix(value, 16)
            .map_err(|e| Error::malformed(format!("bad value for {key}: {e}"), raw))?;
        readings.insert(key, value);
    }
    Ok(readings)
}
