//! Listing orchestration: walk a root and write the manifest.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::core::encoding::OutputEncoding;
use crate::io::config::ListConfig;
use crate::io::manifest::ManifestWriter;
use crate::io::walk::{FileWalker, WalkOptions, check_root};

/// Result of a completed listing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOutcome {
    pub output_file: PathBuf,
    /// Lines written, one per file.
    pub files: usize,
    /// Entries below the root that could not be read.
    pub skipped: usize,
}

/// Write the path of every file under `root` to `output_file`, one per line.
///
/// The root is checked before the manifest is opened, so a bad root leaves
/// any existing manifest untouched. Once opened, the manifest is truncated;
/// on a later failure the lines already written remain.
pub fn list_files(
    root: &Path,
    output_file: &Path,
    encoding: OutputEncoding,
    options: &WalkOptions,
) -> Result<ListOutcome> {
    check_root(root)?;
    debug!(
        root = %root.display(),
        output = %output_file.display(),
        encoding = encoding.name(),
        "listing files"
    );

    let mut manifest = ManifestWriter::create(output_file, encoding)?;
    let mut walker = FileWalker::new(root, options);
    for path in walker.by_ref() {
        manifest.write_path(&path?)?;
    }
    let skipped = walker.skipped();
    let files = manifest.finish()?;

    info!(output = %output_file.display(), files, skipped, "manifest written");
    Ok(ListOutcome {
        output_file: output_file.to_path_buf(),
        files,
        skipped,
    })
}

/// Run a listing from a validated config.
pub fn list_with_config(cfg: &ListConfig) -> Result<ListOutcome> {
    list_files(
        cfg.root()?,
        &cfg.output_file,
        cfg.output_encoding()?,
        &cfg.walk_options(),
    )
}
