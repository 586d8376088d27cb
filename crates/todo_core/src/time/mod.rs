//! Time reference and calendar-day classification.
//!
//! # Responsibility
//! - Provide an injectable clock so derivations are deterministic.
//! - Classify due dates by calendar day, never by hour.

pub mod classifier;
pub mod clock;
