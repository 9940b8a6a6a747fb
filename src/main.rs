use anyhow::Context;
use ci_metrics::{
    accumulator::Accumulator,
    collect::collect,
    config::{Cli, Config},
    logging,
    sink::Sink,
    source::HttpSource,
    SystemClock,
};
use clap::Parser;

/// One poll-and-send cycle; scheduling is left to cron or similar.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    let config = Config::try_from(cli).context("invalid configuration")?;

    let source = HttpSource::new(&config.source);
    let mut sink = Sink::from_config(&config.sink, config.timeout);
    let mut acc = Accumulator::new(&config.namespace, &config.job);
    collect(&source, &SystemClock, &mut acc, &config.labels, &config.job);
    // A failed delivery is already logged and does not fail the run.
    let _delivered = sink.send(acc);
    Ok(())
}
