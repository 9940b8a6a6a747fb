use chrono::TimeDelta;

use crate::{accumulator::Accumulator, document::Document, source::Source, Clock};

pub const LAST_MINUTE_SECS: i64 = 60;
pub const LAST_HOUR_SECS: i64 = 3600;

/// Fetches every CI document and records the derived metrics.
///
/// Fetch failures have already been reduced to empty documents, so each
/// affected metric simply reads as zero.
pub fn collect(
    source: &impl Source,
    clock: &impl Clock,
    acc: &mut Accumulator,
    labels: &[String],
    job: &str,
) {
    let executors = source.fetch("computer");
    let queue = source.fetch("queue");
    let builds_minute = source.fetch_raw(&timeline_path(clock, TimeDelta::seconds(LAST_MINUTE_SECS)));
    let builds_hour = source.fetch_raw(&timeline_path(clock, TimeDelta::seconds(LAST_HOUR_SECS)));

    record_queue(acc, &queue);
    record_builds(acc, "started_builds_last_minute", &builds_minute);
    record_builds(acc, "started_builds_last_hour", &builds_hour);
    record_executors(acc, &executors);

    for label in labels {
        let info = source.fetch(&format!("label/{label}"));
        record_label(acc, label, &info);
    }

    let view = source.fetch(&format!("job/{job}"));
    record_jobs(acc, &view);
}

/// Timeline events in the `window` ending now, as epoch milliseconds.
pub fn timeline_path(clock: &impl Clock, window: TimeDelta) -> String {
    let now = clock.now();
    let min = now - window;
    format!(
        "view/All/timeline/data?min={}&max={}",
        min.timestamp_millis(),
        now.timestamp_millis()
    )
}

pub fn record_queue(acc: &mut Accumulator, queue: &Document) {
    acc.record("queue.size", queue.len("items") as f64);
}

pub fn record_builds(acc: &mut Accumulator, name: &str, timeline: &Document) {
    acc.record(&format!("builds.{name}"), timeline.len("events") as f64);
}

pub fn record_executors(acc: &mut Accumulator, info: &Document) {
    let total = info.number("totalExecutors");
    let busy = info.number("busyExecutors");
    acc.record("executors.total", total);
    acc.record("executors.busy", busy);
    acc.record("executors.free", total - busy);

    let nodes = info.items("computer");
    let offline = nodes.iter().filter(|n| n.flag("offline")).count();
    acc.record("nodes.total", nodes.len() as f64);
    acc.record("nodes.offline", offline as f64);
    acc.record("nodes.online", (nodes.len() - offline) as f64);
}

pub fn record_label(acc: &mut Accumulator, label: &str, info: &Document) {
    let total = info.number("totalExecutors");
    let busy = info.number("busyExecutors");
    let prefix = format!("labels.{label}");
    acc.record(&format!("{prefix}.jobs.tiedJobs"), info.len("tiedJobs") as f64);
    acc.record(&format!("{prefix}.nodes.total"), info.len("nodes") as f64);
    acc.record(&format!("{prefix}.executors.total"), total);
    acc.record(&format!("{prefix}.executors.busy"), busy);
    acc.record(&format!("{prefix}.executors.free"), total - busy);
}

/// Only the exact colors count; `blue_anime` and friends fall in no bucket.
pub fn record_jobs(acc: &mut Accumulator, view: &Document) {
    let jobs = view.items("jobs");
    let count = |color: &str| jobs.iter().filter(|j| j.str("color") == Some(color)).count();
    acc.record("jobs.total", jobs.len() as f64);
    acc.record("jobs.ok", count("blue") as f64);
    acc.record("jobs.fail", count("red") as f64);
    acc.record("jobs.warn", count("yellow") as f64);
}
