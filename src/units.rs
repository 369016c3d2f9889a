//! Physiological constants and the rounding rules shared by the estimator
//! and the projector.

/// Energy content of one pound of body mass (kcal)
pub const KCAL_PER_POUND: f64 = 3500.0;

/// Metabolic adaptation: expenditure drops this many kcal/day per pound lost
pub const ADAPTATION_KCAL_PER_POUND: f64 = 22.0;

pub const DAYS_PER_WEEK: f64 = 7.0;

/// Heaviest weigh-in accepted (lb)
pub const MAX_BODY_WEIGHT: f64 = 1500.0;

/// Round to the nearest integer, ties toward positive infinity.
///
/// `f64::round` sends ties away from zero, which disagrees for negative
/// halves (-2.5 becomes -3 rather than -2).
pub fn round_half_up(value: f64) -> f64 {
  (value + 0.5).floor()
}

/// Round to one decimal place, ties toward positive infinity
pub fn round_tenth(value: f64) -> f64 {
  round_half_up(value * 10.0) / 10.0
}

/// Daily deficit (kcal) needed to lose `pounds_per_week`
pub fn daily_deficit_for_rate(pounds_per_week: f64) -> f64 {
  pounds_per_week * KCAL_PER_POUND / DAYS_PER_WEEK
}
