use anyhow::Context;
use campus::domain::config::{LogRotation, LoggingConfig};
use campus::kernel::prelude::{ApiConfig, load_config};
use campus_logger::{Logger, LoggerBuilder, Rotation};
use campus_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = logger(&cfg.logging).init()?;

    Server::builder().config(cfg).build()?.run().await
}

const fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

fn logger(cfg: &LoggingConfig) -> LoggerBuilder {
    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .env_filter(cfg.level.as_str())
        .json(cfg.json)
        .max_files(cfg.max_files)
        .rotation(rotation(cfg.rotation));

    match &cfg.directory {
        Some(directory) => builder.path(directory),
        None => builder,
    }
}
