use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{document::Document, error::FetchError};

/// Read side of the CI server.
///
/// Implementations never fail: anything that goes wrong while fetching is
/// logged and reported as an empty document.
pub trait Source {
    /// `raw_path` is relative to the base URL and may carry a query string.
    fn fetch_raw(&self, raw_path: &str) -> Document;

    /// Standard JSON endpoint of a CI resource.
    fn fetch(&self, path: &str) -> Document {
        self.fetch_raw(&format!("{path}/api/json"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
}
impl Credentials {
    /// Sent only when the user or the password is non-empty.
    fn authorization(&self) -> Option<String> {
        let user = self.user.as_deref().unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();
        if user.is_empty() && password.is_empty() {
            return None;
        }
        let token = STANDARD.encode(format!("{user}:{password}"));
        Some(format!("Basic {token}"))
    }
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub struct HttpSource {
    client: ureq::Agent,
    base_url: String,
    authorization: Option<String>,
}
impl HttpSource {
    pub fn new(config: &SourceConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build();
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let authorization = config.credentials.authorization();
        Self {
            client,
            base_url,
            authorization,
        }
    }

    pub fn url(&self, raw_path: &str) -> String {
        format!("{}/{}", self.base_url, raw_path.trim_start_matches('/'))
    }

    /// Blocking I/O
    pub fn try_fetch_raw(&self, raw_path: &str) -> Result<Document, FetchError> {
        let mut req = self.client.get(&self.url(raw_path));
        if let Some(auth) = &self.authorization {
            req = req.set("Authorization", auth);
        }
        let resp = req.call()?;
        let root: Value = resp.into_json()?;
        Ok(Document::new(root))
    }
}
impl Source for HttpSource {
    fn fetch_raw(&self, raw_path: &str) -> Document {
        match self.try_fetch_raw(raw_path) {
            Ok(doc) => {
                debug!(path = raw_path, "fetched");
                doc
            }
            Err(e) => {
                warn!(path = raw_path, error = %e, "unable to get jenkins response");
                Document::empty()
            }
        }
    }
}
