use std::collections::BTreeMap;

use crate::MetricKey;

/// Metric values collected during one poll-and-send cycle.
///
/// Keys are composed as `{namespace}.{job}.{suffix}`. Recording the same key
/// twice keeps the last value.
#[derive(Debug, Clone)]
pub struct Accumulator {
    namespace: String,
    job: String,
    points: BTreeMap<MetricKey, f64>,
}
impl Accumulator {
    pub fn new(namespace: &str, job: &str) -> Self {
        let namespace = namespace.trim_end_matches('.').to_string();
        let job = job.trim_end_matches('.').to_string();
        let points = BTreeMap::new();
        Self {
            namespace,
            job,
            points,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn key(&self, suffix: &str) -> MetricKey {
        format!("{}.{}.{}", self.namespace, self.job, suffix)
    }

    pub fn record(&mut self, suffix: &str, value: f64) {
        let key = self.key(suffix);
        self.points.insert(key, value);
    }

    pub fn get(&self, suffix: &str) -> Option<f64> {
        self.points.get(&self.key(suffix)).copied()
    }

    pub fn points(&self) -> &BTreeMap<MetricKey, f64> {
        &self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
