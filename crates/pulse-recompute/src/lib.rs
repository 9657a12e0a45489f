//! # pulse-recompute
//!
//! The write side of the engine: the batch orchestrator that derives
//! every member's assignment and score in one pass, the scheduler that
//! decides when passes run (startup, interval, activity debounce,
//! manual), and the runtime facade the host embeds.

pub mod orchestrator;
pub mod runtime;
pub mod scheduler;
pub mod tracing_setup;

pub use orchestrator::RecomputeOrchestrator;
pub use runtime::{PulseRuntime, RuntimeOptions};
pub use scheduler::RecalcScheduler;
