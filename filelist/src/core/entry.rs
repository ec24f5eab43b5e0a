//! Rules for which walked entries become manifest lines.

use std::path::Path;

use anyhow::{Result, anyhow};

/// What a walked entry is, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symbolic link. `target_is_dir` is true when the link resolves to a directory.
    Symlink { target_is_dir: bool },
    /// Fifo, socket or device node.
    Other,
}

/// Whether an entry of this kind is written to the manifest.
///
/// Directories are never listed. Symlinks to directories count as
/// directories (they are not followed either); dangling links are listed.
pub fn is_listed(kind: EntryKind) -> bool {
    match kind {
        EntryKind::Directory => false,
        EntryKind::Symlink { target_is_dir } => !target_is_dir,
        EntryKind::File | EntryKind::Other => true,
    }
}

/// Render a path as one manifest line, terminator included.
pub fn render_line(path: &Path) -> Result<String> {
    let text = path
        .to_str()
        .ok_or_else(|| anyhow!("path is not valid unicode: {}", path.display()))?;
    Ok(format!("{text}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn directories_are_not_listed() {
        assert!(!is_listed(EntryKind::Directory));
        assert!(!is_listed(EntryKind::Symlink {
            target_is_dir: true
        }));
    }

    #[test]
    fn files_links_and_special_files_are_listed() {
        assert!(is_listed(EntryKind::File));
        assert!(is_listed(EntryKind::Other));
        assert!(is_listed(EntryKind::Symlink {
            target_is_dir: false
        }));
    }

    #[test]
    fn render_line_appends_newline() {
        let path = PathBuf::from("root").join("sub").join("b.txt");
        let expected = format!("{}\n", path.display());
        assert_eq!(render_line(&path).expect("render"), expected);
    }

    #[test]
    fn render_line_keeps_non_ascii() {
        let line = render_line(Path::new("données/été.txt")).expect("render");
        assert_eq!(line, "données/été.txt\n");
    }

    #[cfg(unix)]
    #[test]
    fn render_line_rejects_non_unicode_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"bad\xFFname"));
        let err = render_line(path).unwrap_err();
        assert!(err.to_string().contains("not valid unicode"));
    }
}
