//! Manifest output: one encoded path per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::encoding::OutputEncoding;
use crate::core::entry::render_line;

/// Exclusive owner of the manifest file for the duration of a run.
///
/// Creating the writer truncates any existing file. The handle is released
/// when the writer is dropped; lines written before an error stay on disk.
pub struct ManifestWriter {
    path: PathBuf,
    out: BufWriter<File>,
    encoding: OutputEncoding,
    lines: usize,
}

impl ManifestWriter {
    /// Create (or truncate) the manifest at `path`. Parent directories are
    /// not created.
    pub fn create(path: &Path, encoding: OutputEncoding) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("create manifest {}", path.display()))?;
        let mut out = BufWriter::new(file);
        out.write_all(encoding.bom())
            .with_context(|| format!("write manifest {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            out,
            encoding,
            lines: 0,
        })
    }

    /// Append one line for `entry`.
    pub fn write_path(&mut self, entry: &Path) -> Result<()> {
        let line = render_line(entry)?;
        let bytes = self.encoding.encode(&line)?;
        self.out
            .write_all(&bytes)
            .with_context(|| format!("write manifest {}", self.path.display()))?;
        self.lines += 1;
        Ok(())
    }

    /// Flush buffered lines and close the file, returning the line count.
    pub fn finish(mut self) -> Result<usize> {
        self.out
            .flush()
            .with_context(|| format!("flush manifest {}", self.path.display()))?;
        Ok(self.lines)
    }
}
