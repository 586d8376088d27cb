//! Pure derivations over an in-memory task list.
//!
//! # Responsibility
//! - Turn a fetched task list into UI-facing values: notifications and
//!   their count, a filtered/sorted view, and the tag set.
//!
//! # Invariants
//! - No derivation mutates its input or keeps state between calls.
//! - Every derivation is total: malformed dates degrade, never fail.
//! - Derivations are independent; callers may run them in any order.

pub mod filter;
pub mod notifications;
pub mod sort;
pub mod tags;
