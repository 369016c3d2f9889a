//! Program timeline: dates, week numbers and the `M/D` short format.
//!
//! Every week number is measured from an explicit epoch (the program start
//! date) rather than a module-level constant.

use chrono::{Datelike, Duration, NaiveDate};

use crate::input::InputError;
use crate::units::round_tenth;

/// Fractional 7-day periods between `epoch` and `date`, rounded to 1 decimal
pub fn week_number(epoch: NaiveDate, date: NaiveDate) -> f64 {
  let days = (date - epoch).num_days() as f64;
  round_tenth(days / 7.0)
}

/// Calendar day at the start of integer week `week`
pub fn date_on_week(epoch: NaiveDate, week: u32) -> NaiveDate {
  epoch + Duration::weeks(i64::from(week))
}

/// `M/D` without zero padding, e.g. `9/10` or `1/7`
pub fn format_short(date: NaiveDate) -> String {
  format!("{}/{}", date.month(), date.day())
}

/// Parse a weigh-in date.
///
/// Accepts `YYYY-MM-DD`, or `M/D` interpreted in the epoch's year. An `M/D`
/// date that would land before the epoch rolls into the following year, so
/// a September start still accepts January weigh-ins.
pub fn parse_date(epoch: NaiveDate, text: &str) -> Result<NaiveDate, InputError> {
  let text = text.trim();
  let invalid = || InputError::InvalidDate(text.to_string());

  if text.contains('-') {
    return NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid());
  }

  let (month, day) = text.split_once('/').ok_or_else(invalid)?;
  let month: u32 = month.parse().map_err(|_| invalid())?;
  let day: u32 = day.parse().map_err(|_| invalid())?;

  let same_year = NaiveDate::from_ymd_opt(epoch.year(), month, day).ok_or_else(invalid)?;
  if same_year >= epoch {
    return Ok(same_year);
  }

  // Feb 29 may not exist in the following year
  NaiveDate::from_ymd_opt(epoch.year() + 1, month, day).ok_or_else(invalid)
}
