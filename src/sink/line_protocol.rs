use std::{
    io::{self, Write},
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::{accumulator::Accumulator, error::DeliveryError, format::ValueFormat};

use super::MetricSink;

pub const DEFAULT_PORT: u16 = 2003;

/// Plaintext `<key> <value> <date>` lines pushed over one TCP connection.
#[derive(Debug, Clone)]
pub struct LineProtocolSink {
    host: String,
    port: u16,
    timeout: Option<Duration>,
}
impl LineProtocolSink {
    pub fn new(host: String, port: u16, timeout: Option<Duration>) -> Self {
        Self {
            host,
            port,
            timeout,
        }
    }

    fn connect(&self) -> Result<TcpStream, DeliveryError> {
        let addr = (self.host.as_str(), self.port);
        let Some(timeout) = self.timeout else {
            return TcpStream::connect(addr).map_err(DeliveryError::Connect);
        };
        let addrs = addr.to_socket_addrs().map_err(|source| DeliveryError::Resolve {
            addr: format!("{}:{}", self.host, self.port),
            source,
        })?;
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    stream
                        .set_write_timeout(Some(timeout))
                        .map_err(DeliveryError::Connect)?;
                    return Ok(stream);
                }
                Err(e) => last_err = Some(e),
            }
        }
        let e = last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::AddrNotAvailable, "host resolved to no address")
        });
        Err(DeliveryError::Connect(e))
    }
}
impl MetricSink for LineProtocolSink {
    fn name(&self) -> &'static str {
        "graphite"
    }
    fn value_format(&self) -> ValueFormat {
        ValueFormat::Plain
    }
    fn deliver(&mut self, acc: &Accumulator, now: DateTime<Local>) -> Result<(), DeliveryError> {
        let msg = self.message(acc, now.date_naive());
        let mut stream = self.connect()?;
        stream
            .write_all(msg.as_bytes())
            .map_err(DeliveryError::Write)?;
        debug!(host = %self.host, port = self.port, bytes = msg.len(), "sent");
        Ok(())
    }
}
