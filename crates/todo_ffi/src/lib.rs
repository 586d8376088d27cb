//! Flutter-facing FFI surface over `todo_core`.

pub mod api;
