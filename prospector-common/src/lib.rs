pub mod physics;
pub mod report;
pub mod types;

pub use report::EstimationReport;
pub use types::{ParameterError, ResourceSnapshot, SimulationParameters};
