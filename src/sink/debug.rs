use std::io::{self, Write};

use chrono::{DateTime, Local};
use tracing::warn;

use crate::{accumulator::Accumulator, error::DeliveryError, format::ValueFormat};

use super::MetricSink;

/// Prints the snapshot instead of sending it anywhere.
pub struct DebugSink {
    out: Box<dyn Write + Send>,
}
impl DebugSink {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn write(&mut self, acc: &Accumulator, now: DateTime<Local>) -> io::Result<()> {
        if acc.is_empty() {
            return Ok(());
        }
        let msg = self.message(acc, now.date_naive());
        writeln!(self.out, "DEBUG OUTPUT:")?;
        writeln!(self.out, "{msg}")?;
        self.out.flush()
    }
}
impl MetricSink for DebugSink {
    fn name(&self) -> &'static str {
        "debug"
    }
    fn value_format(&self) -> ValueFormat {
        ValueFormat::OneDecimal
    }
    fn deliver(&mut self, acc: &Accumulator, now: DateTime<Local>) -> Result<(), DeliveryError> {
        if let Err(e) = self.write(acc, now) {
            warn!(error = %e, "unable to write debug output");
        }
        Ok(())
    }
}
impl core::fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DebugSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::TimeZone;

    use super::*;
    use crate::sink::Sink;

    #[derive(Debug, Clone, Default)]
    pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);
    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }
    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn prints_header_and_one_decimal_values() {
        let buf = SharedBuf::default();
        let mut sink = Sink::from(DebugSink::new(Box::new(buf.clone())));
        let mut acc = Accumulator::new("Jenkins", "main");
        acc.record("queue.size", 2.0);
        let now = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(sink.send_at(acc, now));
        assert_eq!(
            buf.contents(),
            "DEBUG OUTPUT:\nJenkins.main.queue.size 2.0 2024-05-01\n\n"
        );
    }

    #[test]
    fn empty_accumulator_prints_nothing() {
        let buf = SharedBuf::default();
        let mut sink = Sink::from(DebugSink::new(Box::new(buf.clone())));
        assert!(sink.send(Accumulator::new("Jenkins", "main")));
        assert_eq!(buf.contents(), "");
    }
}
