//! Phase Projector
//!
//! Week-by-week forward projection through an ordered plan of phases:
//! - each phase runs until the projected weight reaches its lower bound
//! - weight and week counter carry across phases (no restarts)
//! - expenditure adapts downward by a fixed amount per pound already lost
//! - daily calories are whatever hits the phase's weekly loss target

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{PhaseDefinition, Projection, ProjectionPoint};
use crate::timeline::date_on_week;
use crate::units::{daily_deficit_for_rate, round_half_up, round_tenth, ADAPTATION_KCAL_PER_POUND};

/// Slowest accepted weekly loss (lb); anything smaller can vanish in the
/// floating-point weight and stall the projection
pub const MIN_WEEKLY_LOSS_RATE: f64 = 0.01;

/// Hard stop for a single projection (20 years of weeks)
pub const MAX_PROJECTION_WEEKS: usize = 1040;

// ---------------------------------------------------------------------------
/// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PhaseError {
    #[error("Phase plan has no phases")]
    Empty,

    #[error("Phase {id}: weekly loss rate must be finite and at least 0.01 lb (got {rate})")]
    InvalidRate { id: u8, rate: f64 },

    #[error("Phase {id}: lower bound must be finite (got {bound})")]
    InvalidBound { id: u8, bound: f64 },

    #[error("Phase {id}: lower bound {bound} must be below the previous bound {previous}")]
    BoundsNotDecreasing { id: u8, bound: f64, previous: f64 },

    #[error("Phase ids must increase (phase {id} follows {previous})")]
    IdsNotIncreasing { id: u8, previous: u8 },
}

// ---------------------------------------------------------------------------
/// Phase Plan: validated, ordered phases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PhasePlan {
    phases: Vec<PhaseDefinition>,
}

impl PhasePlan {
    /// Validate and wrap a list of phases.
    ///
    /// Rejects anything that could keep the projection loop from
    /// terminating: non-positive rates and bounds that do not strictly
    /// decrease.
    pub fn new(phases: Vec<PhaseDefinition>) -> Result<Self, PhaseError> {
        if phases.is_empty() {
            return Err(PhaseError::Empty);
        }

        let mut previous: Option<&PhaseDefinition> = None;
        for phase in &phases {
            if !phase.weekly_loss_rate.is_finite() || phase.weekly_loss_rate < MIN_WEEKLY_LOSS_RATE {
                return Err(PhaseError::InvalidRate {
                    id: phase.id,
                    rate: phase.weekly_loss_rate,
                });
            }
            if !phase.lower_bound.is_finite() {
                return Err(PhaseError::InvalidBound {
                    id: phase.id,
                    bound: phase.lower_bound,
                });
            }
            if let Some(prev) = previous {
                if phase.id <= prev.id {
                    return Err(PhaseError::IdsNotIncreasing {
                        id: phase.id,
                        previous: prev.id,
                    });
                }
                if phase.lower_bound >= prev.lower_bound {
                    return Err(PhaseError::BoundsNotDecreasing {
                        id: phase.id,
                        bound: phase.lower_bound,
                        previous: prev.lower_bound,
                    });
                }
            }
            previous = Some(phase);
        }

        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[PhaseDefinition] {
        &self.phases
    }

    /// Final lower bound, i.e. the goal weight
    pub fn goal_weight(&self) -> f64 {
        self.phases
            .last()
            .map(|p| p.lower_bound)
            .unwrap_or_default()
    }

    /// Upper bound of the phase at `index` (None for the first phase, which
    /// starts at whatever the current weight is)
    pub fn upper_bound(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(1)
            .and_then(|i| self.phases.get(i))
            .map(|p| p.lower_bound)
    }

    /// The phase `weight` currently sits in
    pub fn phase_for_weight(&self, weight: f64) -> Option<&PhaseDefinition> {
        self.phases.iter().find(|p| weight > p.lower_bound)
    }
}

impl Default for PhasePlan {
    /// Rapid loss to 200, training ramp to 170, final approach to 150
    fn default() -> Self {
        Self {
            phases: vec![
                PhaseDefinition {
                    id: 1,
                    name: "Rapid Fat Loss".to_string(),
                    lower_bound: 200.0,
                    weekly_loss_rate: 2.5,
                    strategy: Some("Maintain aggressive deficit".to_string()),
                    goal: Some("Exit obesity range".to_string()),
                },
                PhaseDefinition {
                    id: 2,
                    name: "Training Ramp".to_string(),
                    lower_bound: 170.0,
                    weekly_loss_rate: 1.9,
                    strategy: Some("More calories for training".to_string()),
                    goal: Some("Race-ready for L'Etape".to_string()),
                },
                PhaseDefinition {
                    id: 3,
                    name: "Final Approach".to_string(),
                    lower_bound: 150.0,
                    weekly_loss_rate: 0.9,
                    strategy: Some("Sustainable deficit + training".to_string()),
                    goal: Some("Return to elite racing weight".to_string()),
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
/// Projection
// ---------------------------------------------------------------------------

/// Expenditure after adapting to `cumulative_loss` pounds lost
pub fn adapted_tdee(baseline_tdee: f64, cumulative_loss: f64) -> f64 {
    baseline_tdee - cumulative_loss * ADAPTATION_KCAL_PER_POUND
}

/// Project weekly from `current_weight` through every phase of `plan`.
///
/// The first point sits at `start_week`; each later point is one week on
/// and one phase-rate lighter. Phases already passed contribute nothing.
/// Stops early after `MAX_PROJECTION_WEEKS` points.
pub fn project(
    current_weight: f64,
    baseline_tdee: f64,
    start_week: u32,
    epoch: NaiveDate,
    plan: &PhasePlan,
) -> Projection {
    let mut points = Vec::new();
    let mut weight = current_weight;
    let mut week = start_week;

    'phases: for phase in plan.phases() {
        let first_in_phase = points.len();
        let deficit = daily_deficit_for_rate(phase.weekly_loss_rate);

        while weight > phase.lower_bound {
            if points.len() >= MAX_PROJECTION_WEEKS {
                warn!(
                    "Projection truncated at {} weeks ({:.1} lb, phase {})",
                    MAX_PROJECTION_WEEKS, weight, phase.id
                );
                break 'phases;
            }

            let tdee = adapted_tdee(baseline_tdee, current_weight - weight);
            let daily_calories = tdee - deficit;

            points.push(ProjectionPoint {
                week_number: week,
                weight: round_tenth(weight),
                date: date_on_week(epoch, week),
                phase: phase.id,
                tdee: round_half_up(tdee) as i64,
                daily_calories: round_half_up(daily_calories),
                deficit: round_half_up(deficit),
                weekly_loss: phase.weekly_loss_rate,
            });

            weight -= phase.weekly_loss_rate;
            week += 1;
        }

        debug!(
            "Phase {} ({}): {} weeks, exits at {:.1} lb",
            phase.id,
            phase.name,
            points.len() - first_in_phase,
            weight
        );
    }

    Projection {
        points,
        end_weight: weight,
        end_week: week,
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
