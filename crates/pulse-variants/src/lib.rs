//! # pulse-variants
//!
//! The experimentation half of the engine: named variant configs with
//! bounded tunables, deterministic slot hashing, and sticky member →
//! variant assignment.

pub mod assignment;
pub mod slotting;
pub mod store;

pub use assignment::{choose_variant, AssignmentOutcome, AssignmentService};
pub use store::VariantStore;
