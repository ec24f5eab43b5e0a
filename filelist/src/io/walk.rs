//! Recursive traversal of the root directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::entry::{EntryKind, is_listed};

/// Traversal options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Visit the entries of each directory in file-name order.
    pub sort: bool,
}

/// Ensure `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<()> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            bail!("root directory {} does not exist", root.display())
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read root directory {}", root.display()));
        }
    };
    if !metadata.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    Ok(())
}

/// Iterator over the paths of every listed file under a root.
///
/// Paths are the root joined with each component down to the file, so they
/// are relative when the root is relative. Symlinks are never followed.
/// Entries that cannot be read below the root are logged and skipped; a
/// failure to read the root itself is yielded as an error.
pub struct FileWalker {
    inner: walkdir::IntoIter,
    skipped: usize,
}

impl FileWalker {
    pub fn new(root: &Path, options: &WalkOptions) -> Self {
        let mut builder = WalkDir::new(root).min_depth(1).follow_links(false);
        if options.sort {
            builder = builder.sort_by_file_name();
        }
        debug!(root = %root.display(), sort = options.sort, "walking");
        Self {
            inner: builder.into_iter(),
            skipped: 0,
        }
    }

    /// Number of unreadable entries skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for FileWalker {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    let root = err
                        .path()
                        .map(|path| path.display().to_string())
                        .unwrap_or_default();
                    return Some(Err(anyhow!(err).context(format!("walk {root}"))));
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(|path| path.display().to_string())
                        .unwrap_or_default();
                    warn!(path = %path, error = %err, "skipping unreadable entry");
                    self.skipped += 1;
                    continue;
                }
            };
            if is_listed(classify(&entry)) {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

fn classify(entry: &DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_symlink() {
        EntryKind::Symlink {
            target_is_dir: entry.path().is_dir(),
        }
    } else {
        EntryKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureTree;

    fn walk_sorted(root: &Path, options: &WalkOptions) -> Vec<String> {
        let mut lines: Vec<String> = FileWalker::new(root, options)
            .map(|path| path.expect("walk").display().to_string())
            .collect();
        lines.sort();
        lines
    }

    #[test]
    fn walks_files_at_every_depth() {
        let files = ["a.txt", "sub/b.txt", "sub/deeper/c.txt", "sub/deeper/last/d"];
        let fixture = FixtureTree::with_files(&files).expect("fixture");

        let found = walk_sorted(&fixture.root(), &WalkOptions::default());
        assert_eq!(found, fixture.expected_lines(&files));
    }

    #[test]
    fn directories_are_not_yielded() {
        let fixture = FixtureTree::with_files(&["sub/b.txt"]).expect("fixture");
        fixture.add_dir("empty/nested").expect("dir");

        let found = walk_sorted(&fixture.root(), &WalkOptions::default());
        assert_eq!(found, fixture.expected_lines(&["sub/b.txt"]));
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let fixture = FixtureTree::new().expect("fixture");
        fixture.add_dir("a/b/c").expect("dir");

        let mut walker = FileWalker::new(&fixture.root(), &WalkOptions::default());
        assert!(walker.next().is_none());
        assert_eq!(walker.skipped(), 0);
    }

    #[test]
    fn sorted_walk_orders_entries_by_name() {
        let fixture = FixtureTree::with_files(&["c.txt", "a.txt", "b/z.txt", "b/y.txt"])
            .expect("fixture");

        let found: Vec<PathBuf> = FileWalker::new(&fixture.root(), &WalkOptions { sort: true })
            .map(|path| path.expect("walk"))
            .collect();
        let expected = vec![
            fixture.path_of("a.txt"),
            fixture.path_of("b/y.txt"),
            fixture.path_of("b/z.txt"),
            fixture.path_of("c.txt"),
        ];
        assert_eq!(found, expected);
    }

    #[test]
    fn check_root_rejects_missing_directory() {
        let fixture = FixtureTree::new().expect("fixture");
        let missing = fixture.path_of("missing");

        let err = check_root(&missing).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn check_root_rejects_file() {
        let fixture = FixtureTree::with_files(&["a.txt"]).expect("fixture");

        let err = check_root(&fixture.path_of("a.txt")).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
        check_root(&fixture.root()).expect("root is a directory");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        use std::os::unix::fs::symlink;

        let fixture = FixtureTree::with_files(&["real/inside.txt", "file.txt"]).expect("fixture");
        symlink(fixture.path_of("real"), fixture.path_of("dir-link")).expect("dir link");
        symlink(fixture.path_of("file.txt"), fixture.path_of("file-link")).expect("file link");
        symlink(fixture.path_of("gone"), fixture.path_of("dangling")).expect("dangling link");

        let found = walk_sorted(&fixture.root(), &WalkOptions::default());
        assert_eq!(
            found,
            fixture.expected_lines(&["dangling", "file-link", "file.txt", "real/inside.txt"])
        );
    }

    #[test]
    fn vanished_subdirectory_is_skipped() {
        let fixture = FixtureTree::with_files(&["a/x.txt", "b/y.txt", "c.txt"]).expect("fixture");
        let mut walker = FileWalker::new(&fixture.root(), &WalkOptions { sort: true });

        let first = walker.next().expect("first entry").expect("walk");
        assert_eq!(first, fixture.path_of("a/x.txt"));
        // `b` is already listed in the root but not yet opened.
        fs::remove_dir_all(fixture.path_of("b")).expect("remove b");

        let rest: Vec<PathBuf> = walker.by_ref().map(|path| path.expect("walk")).collect();
        assert_eq!(rest, vec![fixture.path_of("c.txt")]);
        assert_eq!(walker.skipped(), 1);
    }

    #[test]
    fn unreadable_root_is_yielded_as_error() {
        let fixture = FixtureTree::new().expect("fixture");
        let mut walker = FileWalker::new(&fixture.path_of("missing"), &WalkOptions::default());

        let err = walker.next().expect("root error").unwrap_err();
        assert!(format!("{err:#}").contains("missing"));
        assert_eq!(walker.skipped(), 0);
    }
}
