//! Weekly-series merge: aligns observations and projection points onto one
//! row per integer week for the chart.

use chrono::NaiveDate;

use crate::models::{Observation, Projection, WeeklyRow};
use crate::timeline::{date_on_week, format_short};

/// Chart horizon when the projection gives no final week past 0
pub const DEFAULT_HORIZON_WEEKS: u32 = 60;

/// Last week the series covers: the final projection week, or
/// `DEFAULT_HORIZON_WEEKS` when nothing was projected beyond week 0
pub fn final_week(projection: &Projection) -> u32 {
  projection
    .final_week()
    .filter(|week| *week > 0)
    .unwrap_or(DEFAULT_HORIZON_WEEKS)
}

/// One row per week in `0..=final_week`.
///
/// `weight` comes from the first observation within half a week of the row;
/// `projected` from the projection point at exactly that week.
pub fn merge(observations: &[Observation], projection: &Projection, epoch: NaiveDate) -> Vec<WeeklyRow> {
  (0..=final_week(projection))
    .map(|week| {
      let actual = observations
        .iter()
        .find(|o| (o.week_number - f64::from(week)).abs() < 0.5);
      let projected = projection.points.iter().find(|p| p.week_number == week);

      WeeklyRow {
        week_number: week,
        date: format_short(date_on_week(epoch, week)),
        weight: actual.map(|o| o.weight),
        projected: projected.map(|p| p.weight),
      }
    })
    .collect()
}
