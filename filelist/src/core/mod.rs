//! Deterministic, pure logic shared by the listing pipeline.
//!
//! Core modules must be free of I/O side effects. They classify entries and
//! turn paths into encoded manifest lines so the rules can be tested without
//! touching the filesystem.

pub mod encoding;
pub mod entry;
