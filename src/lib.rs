pub mod buffer;
pub mod cli;
pub mod engine;
pub mod error;
pub mod report;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod tests;

pub use engine::{SimulationEngine, SimulationOptions};
pub use error::{Result, SimError};
pub use report::{AccessOutcome, Report, Statistics};
pub use storage::trace::{AccessType, Trace, TraceRecord};
pub use utils::replacer::{Policy, Replacer};
