//! I/O helpers for listing runs.

pub mod config;
pub mod manifest;
pub mod walk;
