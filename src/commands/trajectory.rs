//! Handlers behind the subcommands

use std::fmt::Write;

use tracing::debug;

use super::{InputArgs, PlanArgs};
use crate::config::TrajectoryConfig;
use crate::dashboard::build_dashboard;
use crate::estimator::estimate;
use crate::input::{default_weigh_ins, load_phases, load_weigh_ins, observations};
use crate::models::{Dashboard, ExpenditureEstimate, Observation};
use crate::projection::PhasePlan;

/// ---------------------------------------------------------------------------
/// Loading
/// ---------------------------------------------------------------------------

fn load_observations(config: &TrajectoryConfig, args: &InputArgs) -> anyhow::Result<Vec<Observation>> {
  let weigh_ins = match &args.input {
    Some(path) => load_weigh_ins(path)?,
    None => {
      debug!("No input file given, using bundled weigh-ins");
      default_weigh_ins()?
    }
  };
  Ok(observations(config.epoch, &weigh_ins)?)
}

fn load_plan(args: &PlanArgs) -> anyhow::Result<PhasePlan> {
  match &args.phases {
    Some(path) => Ok(PhasePlan::new(load_phases(path)?)?),
    None => Ok(PhasePlan::default()),
  }
}

fn effective_config(config: TrajectoryConfig, args: &InputArgs) -> anyhow::Result<TrajectoryConfig> {
  Ok(config.with_overrides(args.daily_intake, args.window_weeks)?)
}

/// ---------------------------------------------------------------------------
/// Commands
/// ---------------------------------------------------------------------------

pub fn get_dashboard(
  config: TrajectoryConfig,
  input: &InputArgs,
  plan: &PlanArgs,
) -> anyhow::Result<Dashboard> {
  let config = effective_config(config, input)?;
  let observations = load_observations(&config, input)?;
  let plan = load_plan(plan)?;
  Ok(build_dashboard(&config, &observations, &plan)?)
}

pub fn get_estimate(config: TrajectoryConfig, input: &InputArgs) -> anyhow::Result<Option<ExpenditureEstimate>> {
  let config = effective_config(config, input)?;
  let observations = load_observations(&config, input)?;
  Ok(estimate(&observations, config.daily_intake, config.window_weeks))
}

/// Plain-text rendering of the dashboard: summary, phases, weekly series
pub fn render_table(dashboard: &Dashboard) -> Result<String, std::fmt::Error> {
  let mut out = String::new();
  let summary = &dashboard.summary;

  writeln!(
    out,
    "{} lb -> {} lb | started {} | week {:.1}",
    summary.current_weight,
    summary.goal_weight,
    dashboard.epoch.format("%b %-d, %Y"),
    summary.current_week
  )?;
  writeln!(out, "Total lost: {} lb", summary.total_lost)?;
  match &dashboard.estimate {
    Some(est) => writeln!(
      out,
      "TDEE: {} kcal ({} kcal/day deficit, {} lb/week over {} weeks)",
      est.tdee, est.daily_deficit, est.weekly_loss_rate, est.weeks_analyzed
    )?,
    None => writeln!(out, "TDEE: {} kcal (fallback)", dashboard.baseline_tdee)?,
  }
  out.push('\n');

  for phase in &dashboard.phases {
    let upper = phase
      .upper_bound
      .map_or_else(|| summary.current_weight.to_string(), |u| u.to_string());
    writeln!(
      out,
      "Phase {}: {} | {} -> {} lb | {} lb/week | est. {} weeks",
      phase.id, phase.name, upper, phase.lower_bound, phase.weekly_loss_rate, phase.estimated_weeks
    )?;
  }
  out.push('\n');

  writeln!(out, "{:>4}  {:<6} {:>8} {:>10}", "Week", "Date", "Actual", "Projected")?;
  let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |w| format!("{:.1}", w));
  for row in &dashboard.weekly {
    writeln!(
      out,
      "{:>4}  {:<6} {:>8} {:>10}",
      row.week_number,
      row.date,
      fmt(row.weight),
      fmt(row.projected)
    )?;
  }

  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn bundled_input() -> InputArgs {
    InputArgs {
      input: None,
      daily_intake: None,
      window_weeks: None,
    }
  }

  #[test]
  fn test_get_dashboard_bundled() {
    let dashboard = get_dashboard(
      TrajectoryConfig::default(),
      &bundled_input(),
      &PlanArgs { phases: None },
    )
    .unwrap();
    assert_eq!(dashboard.summary.current_weight, 213.0);
    assert_eq!(dashboard.estimate.map(|e| e.tdee), Some(2450));
  }

  #[test]
  fn test_daily_intake_override_moves_tdee() {
    let mut input = bundled_input();
    input.daily_intake = Some(1500.0);
    let estimate = get_estimate(TrajectoryConfig::default(), &input).unwrap().unwrap();
    assert_eq!(estimate.tdee, 2750);
  }

  #[test]
  fn test_invalid_override_is_an_error() {
    let mut input = bundled_input();
    input.window_weeks = Some(-1.0);
    assert!(get_estimate(TrajectoryConfig::default(), &input).is_err());
  }

  #[test]
  fn test_bundled_phase_file_matches_default_plan() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/phases.json");
    let plan = load_plan(&PlanArgs { phases: Some(path) }).unwrap();
    assert_eq!(plan, PhasePlan::default());
  }

  #[test]
  fn test_missing_input_file() {
    let mut input = bundled_input();
    input.input = Some(PathBuf::from("/nonexistent/weigh_ins.json"));
    let err = get_estimate(TrajectoryConfig::default(), &input).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
  }

  #[test]
  fn test_render_table() {
    let dashboard = get_dashboard(
      TrajectoryConfig::default(),
      &bundled_input(),
      &PlanArgs { phases: None },
    )
    .unwrap();
    let table = render_table(&dashboard).unwrap();

    assert!(table.starts_with("213 lb -> 150 lb | started Sep 10, 2025 | week 13.3"));
    assert!(table.contains("Total lost: 42 lb"));
    assert!(table.contains("TDEE: 2450 kcal (1250 kcal/day deficit, 2.5 lb/week over 4 weeks)"));
    assert!(table.contains("Phase 2: Training Ramp | 200 -> 170 lb | 1.9 lb/week | est. 16 weeks"));
    assert!(table.contains("   0  9/10      255.0          -"));
    assert!(table.contains("  14  12/17         -      213.0"));
  }
}
