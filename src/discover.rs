//! File set discovery: expand a root path into candidate image files.
//!
//! A root may be a single file or a directory. Directories are walked with
//! `walkdir`, sorted by file name so the discovered order is stable for a
//! given filesystem state. Non-recursive mode looks only at the root
//! directory's own entries. Extension filtering is case-insensitive against
//! the supported set in [`crate::format`].

use crate::format;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand `root` into an ordered list of supported image files.
///
/// A single file yields itself if its extension is supported, otherwise an
/// empty list (the orchestrator logs the rejection). Only the root stat can
/// fail; unreadable entries below it are skipped.
pub fn discover(root: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root)?;

    if metadata.is_file() {
        if format::is_supported(root) {
            return Ok(vec![root.to_path_buf()]);
        }
        return Ok(Vec::new());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let files = WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| format::is_supported(path))
        .collect();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn single_supported_file_yields_itself() {
        let tmp = TempDir::new().unwrap();
        let photo = tmp.path().join("photo.jpg");
        touch(&photo);

        let files = discover(&photo, false).unwrap();
        assert_eq!(files, vec![photo]);
    }

    #[test]
    fn single_unsupported_file_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let doc = tmp.path().join("notes.txt");
        touch(&doc);

        let files = discover(&doc, false).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(discover(Path::new("/nonexistent/root"), true).is_err());
    }

    #[test]
    fn non_recursive_skips_subdirectories() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("b.png"));
        touch(&tmp.path().join("nested/deep.jpg"));
        touch(&tmp.path().join("readme.md"));

        let files = discover(tmp.path(), false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn recursive_descends_fully() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("nested/deep.jpg"));
        touch(&tmp.path().join("nested/further/deepest.png"));

        let files = discover(tmp.path(), true).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("UPPER.JPG"));
        touch(&tmp.path().join("mixed.JpEg"));

        let files = discover(tmp.path(), false).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn order_is_stable_across_calls() {
        let tmp = TempDir::new().unwrap();
        for name in ["c.jpg", "a.jpg", "b.jpg"] {
            touch(&tmp.path().join(name));
        }

        let first = discover(tmp.path(), false).unwrap();
        let second = discover(tmp.path(), false).unwrap();
        assert_eq!(first, second);
    }
}
