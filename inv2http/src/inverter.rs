use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, info};

use crate::config::InverterConfig;
use crate::error::{Error, Result};
use crate::protocol::RequestFrame;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum NetworkState {
    Unknown,
    Online,
    Offline,
}

pub struct Inverter {
    host: String,
    port: u16,
    timeout: Duration,
    buffer_size: usize,
    state: NetworkState,
}

impl Inverter {
    pub fn new(config: &InverterConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            timeout: Duration::from_millis(config.timeout),
            buffer_size: config.buffer_size,
            state: NetworkState::Unknown,
        }
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    fn set_state(&mut self, new_state: NetworkState) {
        if self.state != new_state {
            self.state = new_state;
            info!("Inverter is {new_state:?}");
        }
    }

    /// Sends one request and returns the text of the single response read back.
    ///
    /// Opens a fresh connection for every call; the socket is dropped, and so closed,
    /// on every return path.
    pub fn fetch(&mut self, request: &RequestFrame) -> Result<String> {
        let result = self.exchange(request);
        match &result {
            Ok(_) => self.set_state(NetworkState::Online),
            // a device that answered garbage is still reachable
            Err(Error::Decode(_)) => self.set_state(NetworkState::Online),
            Err(e) => {
                debug!("{e}");
                self.set_state(NetworkState::Offline);
            }
        }
        result
    }

    fn exchange(&self, request: &RequestFrame) -> Result<String> {
        let address = self.resolve()?;
        let mut stream = match TcpStream::connect_timeout(&address, self.timeout) {
            Ok(stream) => stream,
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                return Err(Error::ConnectTimeout {
                    addr: address,
                    timeout: self.timeout,
                })
            }
            Err(e) => return Err(e.into()),
        };
        stream.set_write_timeout(Some(self.timeout))?;
        stream.set_read_timeout(Some(self.timeout))?;

        stream.write_all(request.as_bytes())?;

        let mut buf = vec![0u8; self.buffer_size];
        let read_length = stream.read(&mut buf)?;
        buf.truncate(read_length);

        Ok(String::from_utf8(buf)?)
    }

    fn resolve(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    ErrorKind::NotFound,
                    format!("no address for {}:{}", self.host, self.port),
                ))
            })
    }
}
