//! Core use-case services.
//!
//! # Responsibility
//! - Compose task sources, clock and preferences into use-case level APIs.
//! - Keep UI/FFI layers decoupled from transport details.

pub mod dashboard_service;
