//! Test fixtures shared by the unit tests
//!
//! - the default epoch (Sept 10, 2025)
//! - observation / weigh-in / phase factories
//! - the bundled 21-point weigh-in table on the timeline

use chrono::{Duration, NaiveDate};

use crate::input::{default_weigh_ins, observations};
use crate::models::{Observation, PhaseDefinition, WeighIn};

pub fn epoch() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 9, 10).expect("valid epoch")
}

/// Observation at a given (fractional) week; the date is the nearest day
pub fn observation(week_number: f64, weight: f64) -> Observation {
  let days = (week_number * 7.0).round() as i64;
  Observation {
    date: epoch() + Duration::days(days),
    weight,
    week_number,
  }
}

pub fn weigh_in(date: &str, weight: f64) -> WeighIn {
  WeighIn {
    date: date.to_string(),
    weight,
  }
}

pub fn phase(id: u8, lower_bound: f64, weekly_loss_rate: f64) -> PhaseDefinition {
  PhaseDefinition {
    id,
    name: format!("Phase {}", id),
    lower_bound,
    weekly_loss_rate,
    strategy: None,
    goal: None,
  }
}

pub fn bundled_observations() -> Vec<Observation> {
  let weigh_ins = default_weigh_ins().expect("bundled table parses");
  observations(epoch(), &weigh_ins).expect("bundled table is valid")
}
