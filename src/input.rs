//! Injected input: weigh-in tables and phase plans loaded from JSON.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::{Observation, PhaseDefinition, WeighIn};
use crate::timeline::{parse_date, week_number};
use crate::units::MAX_BODY_WEIGHT;

/// Sample table shipped with the crate, used when no input file is given
const BUNDLED_WEIGH_INS: &str = include_str!("../data/weigh_ins.json");

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum InputError {
  #[error("Failed to read {path}: {source}")]
  Io {
    path: String,
    source: std::io::Error,
  },

  #[error("Invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Invalid date: {0:?} (expected M/D or YYYY-MM-DD)")]
  InvalidDate(String),

  #[error("Invalid weight {weight} on {date}")]
  InvalidWeight { date: String, weight: f64 },
}

/// ---------------------------------------------------------------------------
/// Loading
/// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, InputError> {
  fs::read_to_string(path).map_err(|source| InputError::Io {
    path: path.display().to_string(),
    source,
  })
}

/// Load a JSON array of `{ "date": ..., "weight": ... }`
pub fn load_weigh_ins(path: &Path) -> Result<Vec<WeighIn>, InputError> {
  let weigh_ins: Vec<WeighIn> = serde_json::from_str(&read_file(path)?)?;
  debug!("Loaded {} weigh-ins from {}", weigh_ins.len(), path.display());
  Ok(weigh_ins)
}

/// Load a JSON array of phase definitions
pub fn load_phases(path: &Path) -> Result<Vec<PhaseDefinition>, InputError> {
  let phases: Vec<PhaseDefinition> = serde_json::from_str(&read_file(path)?)?;
  debug!("Loaded {} phases from {}", phases.len(), path.display());
  Ok(phases)
}

pub fn default_weigh_ins() -> Result<Vec<WeighIn>, InputError> {
  Ok(serde_json::from_str(BUNDLED_WEIGH_INS)?)
}

/// Place weigh-ins on the timeline.
///
/// Weights must be positive and no more than `MAX_BODY_WEIGHT`. The result is ordered by date; ties
/// keep their input order.
pub fn observations(epoch: NaiveDate, weigh_ins: &[WeighIn]) -> Result<Vec<Observation>, InputError> {
  let mut observations = weigh_ins
    .iter()
    .map(|entry| {
      let date = parse_date(epoch, &entry.date)?;
      if !entry.weight.is_finite() || entry.weight <= 0.0 || entry.weight > MAX_BODY_WEIGHT {
        return Err(InputError::InvalidWeight {
          date: entry.date.clone(),
          weight: entry.weight,
        });
      }
      Ok(Observation {
        date,
        weight: entry.weight,
        week_number: week_number(epoch, date),
      })
    })
    .collect::<Result<Vec<_>, _>>()?;

  observations.sort_by_key(|o| o.date);
  Ok(observations)
}
