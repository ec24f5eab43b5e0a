//! Recursive file listing into a text manifest.
//!
//! Walks a root directory and writes the path of every file below it, one
//! per line, to an output file in a chosen text encoding.
//!
//! - **[`core`]**: Pure rules (which entries are listed, line rendering,
//!   encodings). No I/O.
//! - **[`io`]**: Configuration loading, directory traversal and the manifest
//!   writer.
//!
//! [`list`] ties them together for the `filelist` binary.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod list;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
