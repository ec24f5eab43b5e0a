//! Test-only helpers for building fixture directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary directory holding a tree to scan (`tree/`) and a sibling
/// directory for manifests (`out/`), so output never lands inside the scan.
pub struct FixtureTree {
    temp: TempDir,
}

impl FixtureTree {
    /// Create an empty fixture tree.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        fs::create_dir(temp.path().join("tree")).context("create tree dir")?;
        fs::create_dir(temp.path().join("out")).context("create out dir")?;
        Ok(Self { temp })
    }

    /// Create a fixture tree containing the given `/`-separated files.
    pub fn with_files(files: &[&str]) -> Result<Self> {
        let fixture = Self::new()?;
        for file in files {
            fixture.add_file(file)?;
        }
        Ok(fixture)
    }

    /// Directory containing `tree/` and `out/`; use as the working directory
    /// when passing relative paths.
    pub fn workdir(&self) -> &Path {
        self.temp.path()
    }

    /// Root directory to scan.
    pub fn root(&self) -> PathBuf {
        self.temp.path().join("tree")
    }

    /// Path for a manifest outside the scanned tree.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.temp.path().join("out").join(name)
    }

    /// Path inside the tree for a `/`-separated relative path.
    pub fn path_of(&self, relative: &str) -> PathBuf {
        join_relative(&self.root(), relative)
    }

    /// Write a small file (parents created as needed).
    pub fn add_file(&self, relative: &str) -> Result<()> {
        let path = self.path_of(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, relative).with_context(|| format!("write file {}", path.display()))
    }

    /// Create a (possibly nested) directory.
    pub fn add_dir(&self, relative: &str) -> Result<()> {
        let path = self.path_of(relative);
        fs::create_dir_all(&path).with_context(|| format!("create directory {}", path.display()))
    }

    /// Expected manifest lines for `relative` files, sorted.
    pub fn expected_lines(&self, relative: &[&str]) -> Vec<String> {
        let mut lines: Vec<String> = relative
            .iter()
            .map(|rel| self.path_of(rel).display().to_string())
            .collect();
        lines.sort();
        lines
    }
}

/// Read a UTF-8 manifest and return its lines sorted.
pub fn sorted_lines(path: &Path) -> Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
    let mut lines: Vec<String> = contents.lines().map(str::to_string).collect();
    lines.sort();
    Ok(lines)
}

fn join_relative(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}
