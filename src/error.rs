use std::io;

use thiserror::Error;

/// Failure to obtain a document from the CI server.
///
/// Never leaves [`crate::source`]: callers only ever see an empty document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport: {0}")]
    Transport(Box<ureq::Transport>),
    #[error("status {0}")]
    Status(u16),
    #[error("parse: {0}")]
    Parse(#[from] io::Error),
}
impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => Self::Status(code),
            ureq::Error::Transport(t) => Self::Transport(Box::new(t)),
        }
    }
}

/// Failure to hand a snapshot to its destination.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("resolve {addr}: {source}")]
    Resolve { addr: String, source: io::Error },
    #[error("connect: {0}")]
    Connect(io::Error),
    #[error("write: {0}")]
    Write(io::Error),
    #[error("runtime: {0}")]
    Runtime(io::Error),
    #[error("cloud: {0}")]
    Cloud(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need to specify the jenkins url")]
    MissingUrl,
    #[error("need to specify the jenkins job")]
    MissingJob,
    #[error("graphite server and cloudwatch region are mutually exclusive")]
    ConflictingSinks,
}
