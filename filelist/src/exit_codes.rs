//! Stable exit codes for the `filelist` binary.

/// Manifest written.
pub const OK: i32 = 0;
/// The run started but failed (unreadable root, unwritable manifest, unencodable path).
pub const FAILED: i32 = 1;
/// Invalid arguments or configuration; nothing was written. Matches clap's usage errors.
pub const USAGE: i32 = 2;
