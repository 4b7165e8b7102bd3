use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::shared::constants::PLACEHOLDER_FILE_NAME;

/// Collects every candidate video under `input_dir`, recursing into
/// subfolders.
///
/// Entries are visited in file-name order within each directory so that
/// index assignment is stable across runs and platforms. The placeholder
/// `.gitkeep` is skipped, as are entries that cannot be read.
pub fn discover_inputs(input_dir: &Path) -> Vec<PathBuf> {
    if !input_dir.is_dir() {
        log::warn!("Input directory {} not found", input_dir.display());
        return Vec::new();
    }

    WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                log::warn!("Access {path} failed: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name() != PLACEHOLDER_FILE_NAME)
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"not really a video").unwrap();
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_inputs(&dir.path().join("video")).is_empty());
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_inputs(dir.path()).is_empty());
    }

    #[test]
    fn test_placeholder_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".gitkeep"));
        touch(&dir.path().join("a.mp4"));

        let inputs = discover_inputs(dir.path());
        assert_eq!(inputs, vec![dir.path().join("a.mp4")]);
    }

    #[test]
    fn test_only_placeholder_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".gitkeep"));
        assert!(discover_inputs(dir.path()).is_empty());
    }

    #[test]
    fn test_files_are_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.mp4", "a.mp4", ".gitkeep", "b.mov"] {
            touch(&dir.path().join(name));
        }

        let inputs = discover_inputs(dir.path());
        assert_eq!(
            inputs,
            vec![
                dir.path().join("a.mp4"),
                dir.path().join("b.mov"),
                dir.path().join("c.mp4"),
            ]
        );
    }

    #[test]
    fn test_nested_directories_are_walked() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.mp4"));
        touch(&dir.path().join("nested/b.mp4"));
        touch(&dir.path().join("nested/.gitkeep"));

        let inputs = discover_inputs(dir.path());
        assert_eq!(
            inputs,
            vec![dir.path().join("a.mp4"), dir.path().join("nested/b.mp4")]
        );
    }

    #[test]
    fn test_paths_are_rooted_at_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("clip.mp4"));

        let inputs = discover_inputs(dir.path());
        assert!(inputs.iter().all(|p| p.starts_with(dir.path())));
    }
}
