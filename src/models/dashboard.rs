use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::projection::{ExpenditureEstimate, ProjectionPoint, WeeklyRow};

/// Where the baseline TDEE for the projection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdeeSource {
  /// Estimated from the weigh-in history
  Observed,
  /// History too short, configured fallback used
  Fallback,
}

impl std::fmt::Display for TdeeSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Observed => write!(f, "observed"),
      Self::Fallback => write!(f, "fallback"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  pub start_weight: f64,
  pub current_weight: f64,
  pub current_week: f64,
  pub total_lost: f64,
  pub goal_weight: f64,
  /// Phase the current weight sits in (None once past the final bound)
  pub current_phase: Option<u8>,
  /// Pounds left until the current phase's lower bound
  pub to_phase_boundary: Option<f64>,
  pub final_projection_week: Option<u32>,
  pub projected_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSummary {
  pub id: u8,
  pub name: String,
  pub upper_bound: Option<f64>,
  pub lower_bound: f64,
  pub weekly_loss_rate: f64,
  pub estimated_weeks: u32,
  pub projected_weeks: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub strategy: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub goal: Option<String>,
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
  pub epoch: NaiveDate,
  pub estimate: Option<ExpenditureEstimate>,
  pub baseline_tdee: f64,
  pub tdee_source: TdeeSource,
  pub summary: Summary,
  pub phases: Vec<PhaseSummary>,
  pub projection: Vec<ProjectionPoint>,
  pub weekly: Vec<WeeklyRow>,
}
