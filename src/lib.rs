pub mod accumulator;
pub mod collect;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod sink;
pub mod source;

use chrono::{DateTime, Local};

type MetricKey = String;

/// Wall clock used for timeline windows and send timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
