//! Injected configuration for derivations and services.
//!
//! # Responsibility
//! - Own the notification preference document and its storage seams.
//!
//! # Invariants
//! - Core never reads configuration from ambient global state; callers pass
//!   preferences (or a store) in explicitly.

pub mod preferences;
