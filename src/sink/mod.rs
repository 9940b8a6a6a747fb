pub mod cloudwatch;
pub mod debug;
pub mod line_protocol;

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use tracing::{info, warn};

use crate::{
    accumulator::Accumulator,
    config::SinkConfig,
    error::DeliveryError,
    format::{render, ValueFormat},
};

use self::{cloudwatch::CloudWatchSink, debug::DebugSink, line_protocol::LineProtocolSink};

/// Destination of one snapshot of recorded metrics.
pub trait MetricSink {
    fn name(&self) -> &'static str;
    fn value_format(&self) -> ValueFormat;
    /// Blocking I/O
    fn deliver(&mut self, acc: &Accumulator, now: DateTime<Local>) -> Result<(), DeliveryError>;

    fn message(&self, acc: &Accumulator, date: NaiveDate) -> String {
        render(acc, self.value_format(), date)
    }
}

#[derive(Debug)]
pub enum Sink {
    Debug(DebugSink),
    LineProtocol(LineProtocolSink),
    CloudWatch(CloudWatchSink),
}
impl Sink {
    pub fn from_config(config: &SinkConfig, timeout: Option<Duration>) -> Self {
        match config {
            SinkConfig::Debug => Self::Debug(DebugSink::stdout()),
            SinkConfig::LineProtocol { host, port } => {
                Self::LineProtocol(LineProtocolSink::new(host.clone(), *port, timeout))
            }
            SinkConfig::CloudWatch { region } => {
                Self::CloudWatch(CloudWatchSink::connect(region.clone(), timeout))
            }
        }
    }

    fn inner(&mut self) -> &mut dyn MetricSink {
        match self {
            Self::Debug(s) => s,
            Self::LineProtocol(s) => s,
            Self::CloudWatch(s) => s,
        }
    }

    pub fn send(&mut self, acc: Accumulator) -> bool {
        self.send_at(acc, Local::now())
    }

    /// Consumes the cycle's accumulator; `false` when delivery failed.
    pub fn send_at(&mut self, acc: Accumulator, now: DateTime<Local>) -> bool {
        let sink = self.inner();
        match sink.deliver(&acc, now) {
            Ok(()) => {
                info!(sink = sink.name(), points = acc.len(), "metrics delivered");
                true
            }
            Err(e) => {
                warn!(sink = sink.name(), error = %e, "unable to send metrics");
                false
            }
        }
    }
}
impl From<DebugSink> for Sink {
    fn from(s: DebugSink) -> Self {
        Self::Debug(s)
    }
}
impl From<LineProtocolSink> for Sink {
    fn from(s: LineProtocolSink) -> Self {
        Self::LineProtocol(s)
    }
}
impl From<CloudWatchSink> for Sink {
    fn from(s: CloudWatchSink) -> Self {
        Self::CloudWatch(s)
    }
}
