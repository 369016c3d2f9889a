//! Pipeline configuration, read from the environment (and `.env`).

use chrono::NaiveDate;
use std::env;
use std::str::FromStr;

use crate::estimator::DEFAULT_WINDOW_WEEKS;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const EPOCH_VAR: &str = "TRAJECTORY_EPOCH";
pub const DAILY_INTAKE_VAR: &str = "TRAJECTORY_DAILY_INTAKE";
pub const WINDOW_WEEKS_VAR: &str = "TRAJECTORY_WINDOW_WEEKS";
pub const FALLBACK_TDEE_VAR: &str = "TRAJECTORY_FALLBACK_TDEE";

const DEFAULT_EPOCH: (i32, u32, u32) = (2025, 9, 10);
const DEFAULT_DAILY_INTAKE: f64 = 1200.0;
const DEFAULT_FALLBACK_TDEE: f64 = 2000.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
  #[error("Invalid value for {var}: {value:?}")]
  Invalid { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryConfig {
  /// Program start date; week 0
  pub epoch: NaiveDate,
  /// Assumed fixed daily intake (kcal) behind the observed weigh-ins
  pub daily_intake: f64,
  /// Trailing window for the TDEE estimate
  pub window_weeks: f64,
  /// Baseline TDEE when the history is too short to estimate one
  pub fallback_tdee: f64,
}

impl Default for TrajectoryConfig {
  fn default() -> Self {
    let (y, m, d) = DEFAULT_EPOCH;
    Self {
      epoch: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
      daily_intake: DEFAULT_DAILY_INTAKE,
      window_weeks: DEFAULT_WINDOW_WEEKS,
      fallback_tdee: DEFAULT_FALLBACK_TDEE,
    }
  }
}

impl TrajectoryConfig {
  /// Defaults overridden by any `TRAJECTORY_*` variables that are set
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    Ok(Self {
      epoch: read_var(EPOCH_VAR, |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())?
        .unwrap_or(defaults.epoch),
      daily_intake: read_positive(DAILY_INTAKE_VAR)?.unwrap_or(defaults.daily_intake),
      window_weeks: read_positive(WINDOW_WEEKS_VAR)?.unwrap_or(defaults.window_weeks),
      fallback_tdee: read_positive(FALLBACK_TDEE_VAR)?.unwrap_or(defaults.fallback_tdee),
    })
  }

  /// Apply command-line overrides on top of this config
  pub fn with_overrides(
    mut self,
    daily_intake: Option<f64>,
    window_weeks: Option<f64>,
  ) -> Result<Self, ConfigError> {
    if let Some(value) = daily_intake {
      self.daily_intake = check_positive(DAILY_INTAKE_VAR, value)?;
    }
    if let Some(value) = window_weeks {
      self.window_weeks = check_positive(WINDOW_WEEKS_VAR, value)?;
    }
    Ok(self)
  }
}

fn read_var<T>(var: &str, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>, ConfigError> {
  match env::var(var) {
    Ok(raw) => parse(raw.trim()).map(Some).ok_or(ConfigError::Invalid {
      var: var.to_string(),
      value: raw,
    }),
    Err(_) => Ok(None),
  }
}

fn read_positive(var: &str) -> Result<Option<f64>, ConfigError> {
  read_var(var, |s| f64::from_str(s).ok().filter(|v| v.is_finite() && *v > 0.0))
}

fn check_positive(var: &str, value: f64) -> Result<f64, ConfigError> {
  if value.is_finite() && value > 0.0 {
    Ok(value)
  } else {
    Err(ConfigError::Invalid {
      var: var.to_string(),
      value: value.to_string(),
    })
  }
}
