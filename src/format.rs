use core::fmt::Write;

use chrono::NaiveDate;

use crate::accumulator::Accumulator;

/// How a sink renders metric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// `12.0`
    OneDecimal,
    /// Shortest representation: `12`, `0.5`.
    Plain,
}
impl ValueFormat {
    pub fn value(self, value: f64) -> String {
        match self {
            Self::OneDecimal => format!("{value:.1}"),
            Self::Plain => format!("{value}"),
        }
    }
}

/// One `<key> <value> <YYYY-MM-DD>\n` line per recorded point.
pub fn render(acc: &Accumulator, format: ValueFormat, date: NaiveDate) -> String {
    let mut msg = String::new();
    for (key, value) in acc.points() {
        // Writing into a String cannot fail.
        let _ = writeln!(msg, "{} {} {}", key, format.value(*value), date.format("%Y-%m-%d"));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn value_formats_differ() {
        assert_eq!(ValueFormat::OneDecimal.value(7.0), "7.0");
        assert_eq!(ValueFormat::OneDecimal.value(1.0 / 3.0), "0.3");
        assert_eq!(ValueFormat::Plain.value(7.0), "7");
        assert_eq!(ValueFormat::Plain.value(0.5), "0.5");
    }

    #[test]
    fn renders_one_line_per_point() {
        let mut acc = Accumulator::new("Jenkins", "main");
        acc.record("queue.size", 4.0);
        acc.record("executors.busy", 1.0);
        assert_eq!(
            render(&acc, ValueFormat::OneDecimal, date()),
            "Jenkins.main.executors.busy 1.0 2024-03-09\nJenkins.main.queue.size 4.0 2024-03-09\n"
        );
        assert_eq!(
            render(&acc, ValueFormat::Plain, date()),
            "Jenkins.main.executors.busy 1 2024-03-09\nJenkins.main.queue.size 4 2024-03-09\n"
        );
    }

    #[test]
    fn empty_accumulator_renders_nothing() {
        let acc = Accumulator::new("Jenkins", "main");
        assert_eq!(render(&acc, ValueFormat::Plain, date()), "");
    }
}
