//! Task and notification data model.
//!
//! # Responsibility
//! - Define the strict task shape every derivation reads.
//! - Define the derived notification shape handed to the UI layer.
//!
//! # Invariants
//! - Loose backend payloads are normalized once, at decode time.
//! - Derived records are never persisted by core.

pub mod notification;
pub mod task;
