//! Expenditure estimator
//!
//! Backs TDEE out of the observed weight change over a trailing window:
//! what was eaten (an assumed fixed intake) plus the deficit implied by the
//! pounds lost. This is a backward difference, not a regression; it follows
//! the last few weeks rather than smoothing the whole history.

use tracing::debug;

use crate::models::{ExpenditureEstimate, Observation};
use crate::units::{round_half_up, round_tenth, DAYS_PER_WEEK, KCAL_PER_POUND};

pub const DEFAULT_WINDOW_WEEKS: f64 = 4.0;

/// Pick the observation that opens the trailing window.
///
/// Scans newest to oldest for the first point at or before
/// `latest - window_weeks`. When the history is shorter than the window the
/// oldest observation is used, so short histories estimate from everything
/// available instead of failing.
pub fn window_start(observations: &[Observation], window_weeks: f64) -> Option<&Observation> {
  let latest = observations.last()?;
  let target_week = latest.week_number - window_weeks;

  observations
    .iter()
    .rev()
    .find(|o| o.week_number <= target_week)
    .or_else(|| observations.first())
}

/// Estimate TDEE from a time-ordered weigh-in series.
///
/// Returns `None` with fewer than two observations, or when the window spans
/// no time (duplicate or out-of-order week numbers).
pub fn estimate(
  observations: &[Observation],
  daily_intake: f64,
  window_weeks: f64,
) -> Option<ExpenditureEstimate> {
  if observations.len() < 2 {
    return None;
  }

  let latest = observations.last()?;
  let earlier = window_start(observations, window_weeks)?;

  let weeks_diff = latest.week_number - earlier.week_number;
  if weeks_diff <= 0.0 {
    debug!("Estimator window spans {} weeks, no estimate", weeks_diff);
    return None;
  }

  let weight_loss = earlier.weight - latest.weight;
  let total_deficit = weight_loss * KCAL_PER_POUND;
  let daily_deficit = total_deficit / (weeks_diff * DAYS_PER_WEEK);
  let tdee = daily_intake + daily_deficit;

  debug!(
    "Estimator window: week {} ({} lb) -> week {} ({} lb)",
    earlier.week_number, earlier.weight, latest.week_number, latest.weight
  );

  Some(ExpenditureEstimate {
    tdee: round_half_up(tdee) as i64,
    daily_deficit: round_half_up(daily_deficit) as i64,
    weekly_loss_rate: round_tenth(weight_loss / weeks_diff),
    weeks_analyzed: round_tenth(weeks_diff),
  })
}
