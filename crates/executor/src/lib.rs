pub mod config;
pub mod executor;
pub mod outcome;

pub use config::ExecutorConfig;
pub use executor::DispatchExecutor;
pub use outcome::{DispatchFailure, DispatchOutcome};
