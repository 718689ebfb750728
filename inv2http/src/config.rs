use std::path::Path;
use std::{env, fs};

use log::warn;
use serde_derive::Deserialize;

static POLL_INTERVAL_DEFAULT: u64 = 1_000;
static INVERTER_PORT_DEFAULT: u16 = 12345;
static INVERTER_TIMEOUT_DEFAULT: u64 = 1_000;
static BUFFER_SIZE_DEFAULT: usize = 8192;
static COLLECTOR_TIMEOUT_DEFAULT: u64 = 10_000;

fn default_poll_interval() -> u64 {
    POLL_INTERVAL_DEFAULT
}

fn default_port() -> u16 {
    INVERTER_PORT_DEFAULT
}

fn default_inverter_timeout() -> u64 {
    INVERTER_TIMEOUT_DEFAULT
}

fn default_buffer_size() -> usize {
    BUFFER_SIZE_DEFAULT
}

fn default_collector_timeout() -> u64 {
    COLLECTOR_TIMEOUT_DEFAULT
}

#[derive(Clone, Debug, Deserialize)]
pub struct InverterConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connect, send and receive timeout in milliseconds.
    #[serde(default = "default_inverter_timeout")]
    pub timeout: u64,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for InverterConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: INVERTER_PORT_DEFAULT,
            timeout: INVERTER_TIMEOUT_DEFAULT,
            buffer_size: BUFFER_SIZE_DEFAULT,
        }
    }
}

impl InverterConfig {
    pub fn is_valid(&self) -> bool {
        !self.host.is_empty() && self.timeout > 0 && self.buffer_size > 0
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CollectorConfig {
    #[serde(default)]
    pub url: String,
    /// HTTP client timeout in milliseconds.
    #[serde(default = "default_collector_timeout")]
    pub timeout: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: COLLECTOR_TIMEOUT_DEFAULT,
        }
    }
}

impl CollectorConfig {
    pub fn is_valid(&self) -> bool {
        !self.url.is_empty() && self.timeout > 0
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Wait between cycles of both loops in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    #[serde(default)]
    pub inverter: InverterConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL_DEFAULT,
            inverter: InverterConfig::default(),
            collector: CollectorConfig::default(),
        }
    }
}

impl Config {
    pub fn is_valid(&self) -> bool {
        self.poll_interval > 0 && self.inverter.is_valid() && self.collector.is_valid()
    }

    /// Reads `path` if possible, then applies environment overrides.
    pub fn load(path: &Path) -> Config {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Could not read {}: {e}", path.display());
                "".into()
            }
        };
        let mut config = match toml::from_str::<Config>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("toml config unparsable: {e}");
                Config::default()
            }
        };
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // $INVERTER_HOST
        if let Some(host) = lookup("INVERTER_HOST") {
            self.inverter.host = host;
        }
        // $INVERTER_PORT (optional)
        if let Some(port) = lookup("INVERTER_PORT") {
            match port.parse() {
                Ok(port) => self.inverter.port = port,
                Err(e) => warn!("ignoring INVERTER_PORT={port}: {e}"),
            }
        }
        // $COLLECTOR_URL
        if let Some(url) = lookup("COLLECTOR_URL") {
            self.collector.url = url;
        }
        // $POLL_INTERVAL (optional)
        if let Some(interval) = lookup("POLL_INTERVAL") {
            match interval.parse() {
                Ok(interval) => self.poll_interval = interval,
                Err(e) => warn!("ignoring POLL_INTERVAL={interval}: {e}"),
            }
        }
    }
}
