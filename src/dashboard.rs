//! Full pipeline: observations -> estimate -> projection -> weekly series,
//! plus the summary figures shown alongside the chart.

use tracing::{info, warn};

use crate::config::TrajectoryConfig;
use crate::estimator::estimate;
use crate::merge::merge;
use crate::models::{Dashboard, Observation, PhaseSummary, Projection, Summary, TdeeSource};
use crate::projection::{project, PhasePlan};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DashboardError {
  #[error("No weigh-ins to project from")]
  NoObservations,
}

/// Baseline TDEE for the projection: the estimate when there is a usable
/// one, otherwise the configured fallback
pub fn baseline_tdee(estimate_tdee: Option<i64>, fallback: f64) -> (f64, TdeeSource) {
  match estimate_tdee {
    Some(tdee) if tdee > 0 => (tdee as f64, TdeeSource::Observed),
    _ => (fallback, TdeeSource::Fallback),
  }
}

/// Weeks each phase should take, and the weeks the projection gave it
pub fn phase_summaries(plan: &PhasePlan, current_weight: f64, projection: &Projection) -> Vec<PhaseSummary> {
  plan
    .phases()
    .iter()
    .enumerate()
    .map(|(index, phase)| {
      let upper_bound = plan.upper_bound(index);
      let top = upper_bound.map_or(current_weight, |upper| upper.min(current_weight));
      let span = (top - phase.lower_bound).max(0.0);

      PhaseSummary {
        id: phase.id,
        name: phase.name.clone(),
        upper_bound,
        lower_bound: phase.lower_bound,
        weekly_loss_rate: phase.weekly_loss_rate,
        estimated_weeks: (span / phase.weekly_loss_rate).ceil() as u32,
        projected_weeks: projection.points_in_phase(phase.id) as u32,
        strategy: phase.strategy.clone(),
        goal: phase.goal.clone(),
      }
    })
    .collect()
}

/// Run the whole pipeline over time-ordered observations
pub fn build_dashboard(
  config: &TrajectoryConfig,
  observations: &[Observation],
  plan: &PhasePlan,
) -> Result<Dashboard, DashboardError> {
  let (first, latest) = match (observations.first(), observations.last()) {
    (Some(first), Some(latest)) => (first, latest),
    _ => return Err(DashboardError::NoObservations),
  };

  let estimate = estimate(observations, config.daily_intake, config.window_weeks);
  let (baseline, tdee_source) = baseline_tdee(estimate.map(|e| e.tdee), config.fallback_tdee);
  match (tdee_source, &estimate) {
    (TdeeSource::Fallback, Some(rejected)) => warn!(
      "Rejected non-positive TDEE estimate of {} kcal, using fallback {} kcal",
      rejected.tdee, config.fallback_tdee
    ),
    (TdeeSource::Fallback, None) => warn!(
      "Not enough history for a TDEE estimate, using fallback {} kcal",
      config.fallback_tdee
    ),
    (TdeeSource::Observed, _) => {}
  }

  let current_weight = latest.weight;
  let start_week = latest.week_number.ceil().max(0.0) as u32;
  let projection = project(current_weight, baseline, start_week, config.epoch, plan);
  let weekly = merge(observations, &projection, config.epoch);

  let current_phase = plan.phase_for_weight(current_weight);
  let summary = Summary {
    start_weight: first.weight,
    current_weight,
    current_week: latest.week_number,
    total_lost: first.weight - current_weight,
    goal_weight: plan.goal_weight(),
    current_phase: current_phase.map(|p| p.id),
    to_phase_boundary: current_phase.map(|p| current_weight - p.lower_bound),
    final_projection_week: projection.final_week(),
    projected_end_date: projection.points.last().map(|p| p.date),
  };

  info!(
    "Projected {} weeks from {} lb (TDEE {} kcal, {})",
    projection.points.len(),
    current_weight,
    baseline,
    tdee_source
  );

  Ok(Dashboard {
    epoch: config.epoch,
    estimate,
    baseline_tdee: baseline,
    tdee_source,
    phases: phase_summaries(plan, current_weight, &projection),
    summary,
    projection: projection.points,
    weekly,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{bundled_observations, observation};
  use tracing_test::traced_test;

  fn bundled_dashboard() -> Dashboard {
    build_dashboard(
      &TrajectoryConfig::default(),
      &bundled_observations(),
      &PhasePlan::default(),
    )
    .unwrap()
  }

  #[test]
  fn test_no_observations() {
    let result = build_dashboard(&TrajectoryConfig::default(), &[], &PhasePlan::default());
    assert_eq!(result, Err(DashboardError::NoObservations));
  }

  #[test]
  #[traced_test]
  fn test_non_positive_estimate_is_replaced_and_logged() {
    // 6 lb gained in 2 weeks on 800 kcal/day: 800 - 1500 = -700
    let config = TrajectoryConfig {
      daily_intake: 800.0,
      ..TrajectoryConfig::default()
    };
    let dashboard = build_dashboard(
      &config,
      &[observation(0.0, 200.0), observation(2.0, 206.0)],
      &PhasePlan::default(),
    )
    .unwrap();

    assert_eq!(dashboard.estimate.map(|e| e.tdee), Some(-700));
    assert_eq!(dashboard.tdee_source, TdeeSource::Fallback);
    assert_eq!(dashboard.baseline_tdee, 2000.0);
    assert!(logs_contain("Rejected non-positive TDEE estimate of -700 kcal"));
    assert!(!logs_contain("Not enough history"));
  }

  #[test]
  #[traced_test]
  fn test_single_observation_uses_fallback() {
    let dashboard = build_dashboard(
      &TrajectoryConfig::default(),
      &[observation(0.0, 210.0)],
      &PhasePlan::default(),
    )
    .unwrap();

    assert_eq!(dashboard.estimate, None);
    assert_eq!(dashboard.tdee_source, TdeeSource::Fallback);
    assert_eq!(dashboard.baseline_tdee, 2000.0);
    assert_eq!(dashboard.projection[0].tdee, 2000);
    assert_eq!(dashboard.projection[0].week_number, 0);
    assert!(logs_contain("Not enough history for a TDEE estimate"));
  }

  #[test]
  fn test_baseline_tdee() {
    assert_eq!(baseline_tdee(Some(2450), 2000.0), (2450.0, TdeeSource::Observed));
    assert_eq!(baseline_tdee(None, 2000.0), (2000.0, TdeeSource::Fallback));
    assert_eq!(baseline_tdee(Some(-300), 2000.0), (2000.0, TdeeSource::Fallback));
  }

  #[test]
  fn test_bundled_end_to_end() {
    let dashboard = bundled_dashboard();

    let estimate = dashboard.estimate.unwrap();
    assert_eq!(estimate.tdee, 2450);
    assert_eq!(dashboard.tdee_source, TdeeSource::Observed);

    let weights: Vec<f64> = dashboard.projection.iter().map(|p| p.weight).collect();
    assert!(weights.windows(2).all(|w| w[1] < w[0]));
    let phases: Vec<u8> = dashboard.projection.iter().map(|p| p.phase).collect();
    assert!(phases.windows(2).all(|w| w[1] >= w[0]));
    assert!(phases.iter().all(|p| (1..=3).contains(p)));

    let final_week = dashboard.summary.final_projection_week.unwrap();
    assert_eq!(dashboard.weekly.len(), final_week as usize + 1);
  }

  #[test]
  fn test_summary_figures() {
    let summary = bundled_dashboard().summary;
    assert_eq!(summary.start_weight, 255.0);
    assert_eq!(summary.current_weight, 213.0);
    assert_eq!(summary.current_week, 13.3);
    assert_eq!(summary.total_lost, 42.0);
    assert_eq!(summary.goal_weight, 150.0);
    assert_eq!(summary.current_phase, Some(1));
    assert_eq!(summary.to_phase_boundary, Some(13.0));
  }

  #[test]
  fn test_phase_summaries() {
    let dashboard = bundled_dashboard();
    let phases = &dashboard.phases;
    assert_eq!(phases.len(), 3);

    assert_eq!(phases[0].upper_bound, None);
    // ceil(13 / 2.5), ceil(30 / 1.9), ceil(20 / 0.9)
    assert_eq!(phases[0].estimated_weeks, 6);
    assert_eq!(phases[1].estimated_weeks, 16);
    assert_eq!(phases[2].estimated_weeks, 23);

    assert_eq!(phases[0].projected_weeks, 6);
    assert_eq!(phases[1].upper_bound, Some(200.0));
    assert_eq!(phases[2].name, "Final Approach");

    let total: u32 = phases.iter().map(|p| p.projected_weeks).sum();
    assert_eq!(total as usize, dashboard.projection.len());
  }

  #[test]
  fn test_phase_summary_below_upper_bound() {
    let plan = PhasePlan::default();
    let projection = project(180.0, 2000.0, 0, crate::test_utils::epoch(), &plan);
    let phases = phase_summaries(&plan, 180.0, &projection);
    assert_eq!(phases[0].estimated_weeks, 0);
    // ceil(10 / 1.9)
    assert_eq!(phases[1].estimated_weeks, 6);
    assert_eq!(phases[1].projected_weeks, 6);
  }

  #[test]
  fn test_pipeline_is_idempotent() {
    let first = serde_json::to_string(&bundled_dashboard()).unwrap();
    let second = serde_json::to_string(&bundled_dashboard()).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn test_json_contract_field_names() {
    let json = serde_json::to_value(bundled_dashboard()).unwrap();
    assert_eq!(json["tdeeSource"], "observed");
    assert_eq!(json["estimate"]["dailyDeficit"], 1250);
    assert_eq!(json["weekly"][0]["weekNumber"], 0);
    assert_eq!(json["weekly"][0]["date"], "9/10");
    assert_eq!(json["weekly"][0]["weight"], 255.0);
    assert!(json["weekly"][0].get("projected").is_none());
    assert_eq!(json["projection"][0]["dailyCalories"], 1200.0);
    assert_eq!(json["summary"]["currentPhase"], 1);
  }
}
