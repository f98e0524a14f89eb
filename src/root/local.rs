/*!
 * Local filesystem root
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{Root, README_FILE, README_NOT_FOUND};
use crate::error::Result;
use crate::ensure;
use crate::types::ListEntry;

/// A directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalRoot {
    /// Canonical absolute path of the root directory
    base: PathBuf,
    /// Last path component of `base`, or `base` itself for a filesystem root
    name: String,
}

impl LocalRoot {
    /// Open a local directory as a root
    pub fn open(path: &Path) -> Result<Self> {
        ensure!(
            path.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            path.display()
        );

        let base = fs::canonicalize(path)?;
        // Fail early on directories we cannot list
        fs::read_dir(&base)?;

        // A filesystem root has no last component
        let name = match base.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => base.display().to_string(),
        };

        Ok(Self { base, name })
    }

    fn resolve(&self, rel_path: &str) -> PathBuf {
        if rel_path.is_empty() {
            self.base.clone()
        } else {
            self.base.join(rel_path)
        }
    }
}

impl Root for LocalRoot {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&self, rel_path: &str) -> Result<Vec<ListEntry>> {
        let dir = self.resolve(rel_path);
        let mut entries = Vec::new();

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                // The directory itself could not be opened
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!("Error reading entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let name = match entry.file_name().to_str() {
                Some(name) => name.to_string(),
                None => {
                    warn!(
                        "Skipping {}: file name is not valid UTF-8",
                        entry.path().display()
                    );
                    continue;
                }
            };
            let file_type = entry.file_type();

            if file_type.is_dir() {
                entries.push(ListEntry::dir(name));
            } else if file_type.is_symlink() && entry.path().is_dir() {
                debug!("Skipping symlinked directory {}", entry.path().display());
            } else {
                entries.push(ListEntry::file(name));
            }
        }

        Ok(entries)
    }

    fn read_bytes(&self, rel_path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.resolve(rel_path))?)
    }

    fn readme(&self) -> String {
        let path = self.base.join(README_FILE);
        if !path.exists() {
            return README_NOT_FOUND.to_string();
        }

        match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => format!("Error reading README file: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoTxtError;
    use crate::types::EntryKind;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let err = LocalRoot::open(&temp_dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, RepoTxtError::PathNotFound(_)));
    }

    #[test]
    fn test_list_reports_kinds() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("file.txt"), "x").unwrap();

        let root = LocalRoot::open(temp_dir.path()).unwrap();
        let mut entries = root.list("").unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![ListEntry::file("file.txt"), ListEntry::dir("sub")]
        );
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    #[test]
    fn test_list_missing_subdirectory_is_error() {
        let temp_dir = tempdir().unwrap();
        let root = LocalRoot::open(temp_dir.path()).unwrap();
        assert!(root.list("missing").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_skipped() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("loop"))
            .unwrap();

        let root = LocalRoot::open(temp_dir.path()).unwrap();
        let entries = root.list("").unwrap();
        assert_eq!(entries, vec![ListEntry::dir("real")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("good.txt"), "x").unwrap();
        fs::write(temp_dir.path().join(OsStr::from_bytes(b"bad\xff.txt")), "x").unwrap();

        let root = LocalRoot::open(temp_dir.path()).unwrap();
        assert_eq!(root.list("").unwrap(), vec![ListEntry::file("good.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_filesystem_root_has_a_name() {
        let root = LocalRoot::open(Path::new("/")).unwrap();
        assert_eq!(root.name(), "/");
    }

    #[test]
    fn test_name_is_last_component() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("my-project")).unwrap();
        let root = LocalRoot::open(&temp_dir.path().join("my-project/")).unwrap();
        assert_eq!(root.name(), "my-project");
    }

    #[test]
    fn test_readme_states() {
        let temp_dir = tempdir().unwrap();
        let root = LocalRoot::open(temp_dir.path()).unwrap();
        assert_eq!(root.readme(), README_NOT_FOUND);

        fs::write(temp_dir.path().join(README_FILE), "# Title\n").unwrap();
        assert_eq!(root.readme(), "# Title\n");

        fs::write(temp_dir.path().join(README_FILE), b"\xff\xfe").unwrap();
        assert!(root.readme().starts_with("Error reading README file:"));
    }
}
