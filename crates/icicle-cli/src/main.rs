#![doc = include_str!("../README.md")]

mod app;

use app::command::run;
use app::config::{CliArgs, Config};
use app::telemetry::init_telemetry;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry()?;
    tracing::debug!("Resolved configuration: {:#?}", config);

    let stdout = std::io::stdout();
    run(&config, &mut stdout.lock())
}
