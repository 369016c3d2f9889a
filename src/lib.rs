pub mod commands;
pub mod config;
pub mod dashboard;
pub mod estimator;
pub mod input;
pub mod merge;
pub mod models;
pub mod projection;
pub mod timeline;
pub mod units;

#[cfg(test)]
mod test_utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Cli;
use config::TrajectoryConfig;

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  // stdout carries the JSON output
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

pub fn run() -> anyhow::Result<()> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let config = TrajectoryConfig::from_env()?;
  let output = commands::execute(cli.command, config)?;
  println!("{}", output);
  Ok(())
}
