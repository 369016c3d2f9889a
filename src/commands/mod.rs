//! Command-line surface: one subcommand per pipeline stage

pub mod trajectory;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::TrajectoryConfig;

#[derive(Debug, Parser)]
#[command(
  name = "weight-trajectory",
  about = "Observed TDEE and phased weight-loss projection",
  long_about = "Estimate energy expenditure from a weigh-in history and project it through a phased plan"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  /// Enable debug logging (RUST_LOG takes precedence)
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Full dashboard: estimate, projection, weekly series and summaries
  Dashboard {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    plan: PlanArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
  },
  /// TDEE estimate only (prints `null` when the history is too short)
  Estimate {
    #[command(flatten)]
    input: InputArgs,
  },
  /// Projection points only
  Project {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    plan: PlanArgs,
  },
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
  /// JSON array of {"date", "weight"} weigh-ins (bundled sample if omitted)
  #[arg(long)]
  pub input: Option<PathBuf>,

  /// Assumed daily intake in kcal
  #[arg(long)]
  pub daily_intake: Option<f64>,

  /// Trailing window for the TDEE estimate, in weeks
  #[arg(long)]
  pub window_weeks: Option<f64>,
}

#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
  /// JSON array of phase definitions (built-in three-phase plan if omitted)
  #[arg(long)]
  pub phases: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  Json,
  Table,
}

/// Run one subcommand and return what should be printed
pub fn execute(command: Command, config: TrajectoryConfig) -> anyhow::Result<String> {
  match command {
    Command::Dashboard { input, plan, format } => {
      let dashboard = trajectory::get_dashboard(config, &input, &plan)?;
      match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&dashboard)?),
        OutputFormat::Table => Ok(trajectory::render_table(&dashboard)?),
      }
    }
    Command::Estimate { input } => {
      let estimate = trajectory::get_estimate(config, &input)?;
      Ok(serde_json::to_string_pretty(&estimate)?)
    }
    Command::Project { input, plan } => {
      let points = trajectory::get_dashboard(config, &input, &plan)?.projection;
      Ok(serde_json::to_string_pretty(&points)?)
    }
  }
}
