mod config;
mod engine;
mod error;
mod report;
mod state;

pub use config::AllocationConfig;
pub use engine::{allocate, AllocationOutcome};
pub use error::{EngineError, Result};
pub use report::AllocationReport;
pub use state::AllocationState;
