pub mod dashboard;
pub mod observation;
pub mod projection;

pub use dashboard::{Dashboard, PhaseSummary, Summary, TdeeSource};
pub use observation::{Observation, WeighIn};
pub use projection::{ExpenditureEstimate, PhaseDefinition, Projection, ProjectionPoint, WeeklyRow};
