use std::time::Duration;

use aws_config::{timeout::TimeoutConfig, BehaviorVersion};
use aws_sdk_cloudwatch::{
    config::Region,
    error::DisplayErrorContext,
    primitives::DateTime as AwsDateTime,
    types::{MetricDatum, StandardUnit},
    Client,
};
use chrono::{DateTime, Local};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::{accumulator::Accumulator, error::DeliveryError, format::ValueFormat};

use super::MetricSink;

/// Remote "put metric data" call for a single point.
pub trait MetricApi {
    fn put_metric(
        &mut self,
        namespace: &str,
        name: &str,
        value: f64,
        timestamp: DateTime<Local>,
    ) -> Result<(), DeliveryError>;
}

/// AWS CloudWatch client, connected on first use.
pub struct CloudWatchApi {
    region: String,
    timeout: Option<Duration>,
    conn: Option<(Runtime, Client)>,
}
impl CloudWatchApi {
    pub fn new(region: String, timeout: Option<Duration>) -> Self {
        Self {
            region,
            timeout,
            conn: None,
        }
    }

    fn open(&self) -> Result<(Runtime, Client), DeliveryError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DeliveryError::Runtime)?;
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(self.region.clone()));
        if let Some(timeout) = self.timeout {
            loader = loader.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
        }
        let config = runtime.block_on(loader.load());
        let client = Client::new(&config);
        Ok((runtime, client))
    }
}
impl MetricApi for CloudWatchApi {
    fn put_metric(
        &mut self,
        namespace: &str,
        name: &str,
        value: f64,
        timestamp: DateTime<Local>,
    ) -> Result<(), DeliveryError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.open()?,
        };
        let (runtime, client) = self.conn.insert(conn);
        let datum = MetricDatum::builder()
            .metric_name(name)
            .value(value)
            .timestamp(AwsDateTime::from_millis(timestamp.timestamp_millis()))
            .unit(StandardUnit::Count)
            .build();
        let put = client
            .put_metric_data()
            .namespace(namespace)
            .metric_data(datum)
            .send();
        runtime
            .block_on(put)
            .map_err(|e| DeliveryError::Cloud(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

/// One remote call per point; the first failure abandons the rest of the
/// cycle and points already sent stay sent.
pub struct CloudWatchSink {
    api: Box<dyn MetricApi + Send>,
}
impl CloudWatchSink {
    pub fn new(api: Box<dyn MetricApi + Send>) -> Self {
        Self { api }
    }
    pub fn connect(region: String, timeout: Option<Duration>) -> Self {
        Self::new(Box::new(CloudWatchApi::new(region, timeout)))
    }
}
impl MetricSink for CloudWatchSink {
    fn name(&self) -> &'static str {
        "cloudwatch"
    }
    fn value_format(&self) -> ValueFormat {
        ValueFormat::OneDecimal
    }
    fn deliver(&mut self, acc: &Accumulator, now: DateTime<Local>) -> Result<(), DeliveryError> {
        debug!("{}", self.message(acc, now.date_naive()));
        for (key, value) in acc.points() {
            self.api.put_metric(acc.namespace(), key, *value, now)?;
        }
        Ok(())
    }
}
impl core::fmt::Debug for CloudWatchSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CloudWatchSink").finish_non_exhaustive()
    }
}
