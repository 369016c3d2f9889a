use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// TDEE derived from the observed weight change over a trailing window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenditureEstimate {
  pub tdee: i64,
  pub daily_deficit: i64,
  pub weekly_loss_rate: f64,
  pub weeks_analyzed: f64,
}

/// One hand-authored phase of the plan. The phase runs from the previous
/// phase's lower bound (or the current weight, for the first phase) down to
/// `lower_bound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDefinition {
  pub id: u8,
  pub name: String,
  pub lower_bound: f64,
  pub weekly_loss_rate: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub strategy: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub goal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
  pub week_number: u32,
  pub weight: f64,
  pub date: NaiveDate,
  pub phase: u8,
  pub tdee: i64,
  /// Intake that hits this week's target loss given the adapted TDEE
  pub daily_calories: f64,
  pub deficit: f64,
  pub weekly_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
  pub points: Vec<ProjectionPoint>,
  /// Weight carried past the last emitted point
  pub end_weight: f64,
  /// Week counter after the last emitted point
  pub end_week: u32,
}

impl Projection {
  pub fn final_week(&self) -> Option<u32> {
    self.points.last().map(|p| p.week_number)
  }

  pub fn points_in_phase(&self, phase: u8) -> usize {
    self.points.iter().filter(|p| p.phase == phase).count()
  }
}

/// Presentation row: one per integer week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRow {
  pub week_number: u32,
  pub date: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weight: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub projected: Option<f64>,
}
