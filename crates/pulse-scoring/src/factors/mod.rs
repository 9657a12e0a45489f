//! The individual scoring factors. Each is a pure function over the
//! member's snapshot and the variant's (already normalized) parameter
//! set.

pub mod penalty;
pub mod pillars;
pub mod quality;
pub mod recency;
