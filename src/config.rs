use std::time::Duration;

use clap::Parser;

use crate::{
    error::ConfigError,
    sink::line_protocol::DEFAULT_PORT,
    source::{Credentials, SourceConfig},
};

/// Send various statistics about a Jenkins server to Graphite or CloudWatch.
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Cli {
    /// Base url of your jenkins server (ex http://jenkins.example.com)
    #[arg(long)]
    pub jenkins_url: Option<String>,

    /// User to authenticate with for jenkins
    #[arg(long, env = "JENKINS_USER")]
    pub jenkins_user: Option<String>,

    /// Password for authenticating with jenkins
    #[arg(long, env = "JENKINS_PASSWORD", hide_env_values = true)]
    pub jenkins_password: Option<String>,

    /// Job view to monitor for success/failure
    #[arg(long)]
    pub job: Option<String>,

    /// Used as either the CloudWatch metric namespace or the Graphite metric namespace
    #[arg(long, default_value = "Jenkins")]
    pub namespace: String,

    /// Fetch stats applicable to this node label. Can be repeated.
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Host name of the server running graphite
    #[arg(long)]
    pub graphite_server: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub graphite_port: u16,

    /// CloudWatch region where these metrics reside
    #[arg(long)]
    pub region: Option<String>,

    /// Output the data and do not send to CloudWatch or Graphite
    #[arg(long)]
    pub debug: bool,

    /// Timeout for every HTTP and TCP call, in seconds; 0 waits forever
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log verbosity when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkConfig {
    Debug,
    LineProtocol { host: String, port: u16 },
    CloudWatch { region: String },
}
impl SinkConfig {
    /// `debug` wins over any push target; without one, fall back to debug.
    pub fn select(
        debug: bool,
        graphite: Option<(String, u16)>,
        region: Option<String>,
    ) -> Result<Self, ConfigError> {
        let graphite = graphite.filter(|(host, _)| !host.is_empty());
        let region = region.filter(|r| !r.is_empty());
        if debug {
            return Ok(Self::Debug);
        }
        match (graphite, region) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingSinks),
            (Some((host, port)), None) => Ok(Self::LineProtocol { host, port }),
            (None, Some(region)) => Ok(Self::CloudWatch { region }),
            (None, None) => Ok(Self::Debug),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub namespace: String,
    pub job: String,
    pub labels: Vec<String>,
    pub sink: SinkConfig,
    pub timeout: Option<Duration>,
}
impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let base_url = cli
            .jenkins_url
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUrl)?;
        let job = cli
            .job
            .filter(|j| !j.is_empty())
            .ok_or(ConfigError::MissingJob)?;
        let timeout = match cli.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let sink = SinkConfig::select(
            cli.debug,
            cli.graphite_server.map(|host| (host, cli.graphite_port)),
            cli.region,
        )?;
        let source = SourceConfig {
            base_url,
            credentials: Credentials {
                user: cli.jenkins_user,
                password: cli.jenkins_password,
            },
            timeout,
        };
        Ok(Self {
            source,
            namespace: cli.namespace,
            job,
            labels: cli.labels,
            sink,
            timeout,
        })
    }
}
