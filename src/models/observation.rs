use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw weigh-in as entered: `date` is either `M/D` or `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighIn {
  pub date: String,
  pub weight: f64,
}

/// A weigh-in placed on the program timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
  pub date: NaiveDate,
  pub weight: f64,
  /// Fractional weeks since the epoch, rounded to 1 decimal
  pub week_number: f64,
}
