//! Task store collaborator boundary.
//!
//! # Responsibility
//! - Define the read-only task supply contract used by services.
//! - Provide in-memory and HTTP implementations.
//!
//! # Invariants
//! - Tasks are fetched, never persisted, by core.
//! - Authentication is injected through `AuthTokenProvider`.

pub mod http;
pub mod source;
