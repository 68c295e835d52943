//! Asset index: the project's record of which assets exist under `Assets/`.
//!
//! Paths are project-relative and `/`-separated (`Assets/_Project/Managers`).
//! Queries answer from the last snapshot, so folders created directly on disk
//! are invisible until [`AssetIndex::refresh`] runs. Mutations made through the
//! index keep the snapshot current.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IndexError, IndexResult};

/// Root folder of every indexed asset path.
pub const ASSETS_ROOT: &str = "Assets";

const META_EXTENSION: &str = ".meta";

/// Storage of project assets with existence queries and structural edits.
pub trait AssetIndex {
    /// Re-synchronise with the files on disk.
    fn refresh(&mut self) -> IndexResult<()>;

    /// Whether `path` is a known folder.
    fn folder_exists(&self, path: &str) -> bool;

    /// Whether `path` is a known asset (file or folder).
    fn asset_exists(&self, path: &str) -> bool;

    /// Rename the last segment of `path` to `new_name`.
    fn rename(&mut self, path: &str, new_name: &str) -> IndexResult<()>;

    /// Move `from` to `to`; the parent of `to` must exist.
    fn move_asset(&mut self, from: &str, to: &str) -> IndexResult<()>;

    /// Delete an asset, recursively for folders.
    fn delete(&mut self, path: &str) -> IndexResult<()>;

    /// Copy a file from anywhere in the project to `to` inside `Assets/`.
    fn copy(&mut self, from: &str, to: &str) -> IndexResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Folder,
    File,
}

/// [`AssetIndex`] over a project directory on disk. `.meta` sidecar files
/// follow their asset on rename, move and delete.
#[derive(Debug)]
pub struct FsAssetIndex {
    project_root: PathBuf,
    entries: BTreeMap<String, EntryKind>,
}

impl FsAssetIndex {
    /// Open the project at `project_root` and take the first snapshot.
    pub fn open(project_root: impl Into<PathBuf>) -> IndexResult<Self> {
        let mut index = Self {
            project_root: project_root.into(),
            entries: BTreeMap::new(),
        };
        index.refresh()?;
        Ok(index)
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Number of indexed assets, `Assets` itself included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn disk_path(&self, path: &str) -> PathBuf {
        self.project_root.join(path)
    }

    fn scan(&self) -> IndexResult<BTreeMap<String, EntryKind>> {
        let mut entries = BTreeMap::new();
        let root = self.disk_path(ASSETS_ROOT);
        if !root.is_dir() {
            return Ok(entries);
        }

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| IndexError::Io {
                path: ASSETS_ROOT.to_string(),
                source: e.into(),
            })?;
            let Ok(relative) = entry.path().strip_prefix(&self.project_root) else {
                continue;
            };
            let key = to_asset_path(relative);
            if key.ends_with(META_EXTENSION) {
                continue;
            }
            let kind = if entry.file_type().is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            entries.insert(key, kind);
        }
        Ok(entries)
    }

    /// Rewrite every entry at or below `from` to live below `to`.
    fn relocate(&mut self, from: &str, to: &str) {
        let moved: Vec<(String, EntryKind)> = self
            .subtree(from)
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        for (key, kind) in moved {
            self.entries.remove(&key);
            let suffix = &key[from.len()..];
            self.entries.insert(format!("{to}{suffix}"), kind);
        }
    }

    fn forget(&mut self, path: &str) {
        let doomed: Vec<String> = self.subtree(path).map(|(k, _)| k.clone()).collect();
        for key in doomed {
            self.entries.remove(&key);
        }
    }

    fn subtree<'a>(&'a self, path: &'a str) -> impl Iterator<Item = (&'a String, &'a EntryKind)> {
        let prefix = format!("{path}/");
        self.entries
            .range(path.to_string()..)
            .take_while(move |(k, _)| k.starts_with(path))
            .filter(move |(k, _)| k.as_str() == path || k.starts_with(&prefix))
    }

    fn io_error(path: &str) -> impl FnOnce(std::io::Error) -> IndexError + '_ {
        move |source| IndexError::Io {
            path: path.to_string(),
            source,
        }
    }

    fn check_destination(&self, to: &str) -> IndexResult<()> {
        if self.entries.contains_key(to) || self.disk_path(to).exists() {
            return Err(IndexError::AlreadyExists {
                path: to.to_string(),
            });
        }
        let parent = parent_of(to).unwrap_or(ASSETS_ROOT);
        if !self.folder_exists(parent) {
            return Err(IndexError::MissingParent {
                path: parent.to_string(),
            });
        }
        Ok(())
    }

    /// Move `from` and its `.meta` sidecar. The snapshot follows the main
    /// move even when the sidecar cannot be moved.
    fn move_on_disk(&mut self, from: &str, to: &str) -> IndexResult<()> {
        std::fs::rename(self.disk_path(from), self.disk_path(to)).map_err(Self::io_error(from))?;
        self.relocate(from, to);
        let meta_from = self.disk_path(&format!("{from}{META_EXTENSION}"));
        if meta_from.exists() {
            std::fs::rename(&meta_from, self.disk_path(&format!("{to}{META_EXTENSION}")))
                .map_err(Self::io_error(from))?;
        }
        Ok(())
    }
}

impl AssetIndex for FsAssetIndex {
    fn refresh(&mut self) -> IndexResult<()> {
        self.entries = self.scan()?;
        debug!(assets = self.entries.len(), "asset index refreshed");
        Ok(())
    }

    fn folder_exists(&self, path: &str) -> bool {
        self.entries.get(path) == Some(&EntryKind::Folder)
    }

    fn asset_exists(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    fn rename(&mut self, path: &str, new_name: &str) -> IndexResult<()> {
        validate_asset_path(path)?;
        if new_name.is_empty() || new_name.contains(['/', '\\']) {
            return Err(IndexError::InvalidPath {
                path: new_name.to_string(),
                reason: "new name must be a single path segment".to_string(),
            });
        }
        if !self.asset_exists(path) {
            return Err(IndexError::NotFound {
                path: path.to_string(),
            });
        }
        let to = match parent_of(path) {
            Some(parent) => format!("{parent}/{new_name}"),
            None => new_name.to_string(),
        };
        self.check_destination(&to)?;
        self.move_on_disk(path, &to)
    }

    fn move_asset(&mut self, from: &str, to: &str) -> IndexResult<()> {
        validate_asset_path(from)?;
        validate_asset_path(to)?;
        if !self.asset_exists(from) {
            return Err(IndexError::NotFound {
                path: from.to_string(),
            });
        }
        if to.starts_with(&format!("{from}/")) {
            return Err(IndexError::InvalidPath {
                path: to.to_string(),
                reason: format!("cannot move {from} into itself"),
            });
        }
        self.check_destination(to)?;
        self.move_on_disk(from, to)
    }

    fn delete(&mut self, path: &str) -> IndexResult<()> {
        validate_asset_path(path)?;
        let kind = *self.entries.get(path).ok_or_else(|| IndexError::NotFound {
            path: path.to_string(),
        })?;
        let disk = self.disk_path(path);
        let removed = match kind {
            EntryKind::Folder => std::fs::remove_dir_all(&disk),
            EntryKind::File => std::fs::remove_file(&disk),
        };
        removed.map_err(Self::io_error(path))?;

        let meta = self.disk_path(&format!("{path}{META_EXTENSION}"));
        if meta.exists() {
            std::fs::remove_file(&meta).map_err(Self::io_error(path))?;
        }
        self.forget(path);
        Ok(())
    }

    fn copy(&mut self, from: &str, to: &str) -> IndexResult<()> {
        validate_relative(from)?;
        validate_asset_path(to)?;
        let source = self.disk_path(from);
        if !source.is_file() {
            return Err(IndexError::NotFound {
                path: from.to_string(),
            });
        }
        self.check_destination(to)?;
        std::fs::copy(&source, self.disk_path(to)).map_err(Self::io_error(from))?;
        self.entries.insert(to.to_string(), EntryKind::File);
        Ok(())
    }
}

/// `Assets/...` path for a project-relative filesystem path.
fn to_asset_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn parent_of(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

fn validate_relative(path: &str) -> IndexResult<()> {
    let invalid = |reason: &str| {
        Err(IndexError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        })
    };
    if path.is_empty() || path.starts_with('/') || path.contains('\\') {
        return invalid("expected a project-relative path with '/' separators");
    }
    if path.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return invalid("empty, '.' or '..' segment");
    }
    Ok(())
}

fn validate_asset_path(path: &str) -> IndexResult<()> {
    validate_relative(path)?;
    if !path.starts_with(&format!("{ASSETS_ROOT}/")) {
        return Err(IndexError::InvalidPath {
            path: path.to_string(),
            reason: format!("must be inside {ASSETS_ROOT}/"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Project with `Assets/Scenes` (+ meta), `Assets/Settings`, `Assets/Readme.asset`.
    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join(ASSETS_ROOT);
        fs::create_dir_all(assets.join("Scenes")).unwrap();
        fs::write(assets.join("Scenes.meta"), "guid: 1").unwrap();
        fs::write(assets.join("Scenes/Main.unity"), "scene").unwrap();
        fs::create_dir_all(assets.join("Settings")).unwrap();
        fs::write(assets.join("Readme.asset"), "readme").unwrap();
        dir
    }

    #[test]
    fn test_snapshot_contents() {
        let dir = project();
        let index = FsAssetIndex::open(dir.path()).unwrap();

        assert!(index.folder_exists("Assets"));
        assert!(index.folder_exists("Assets/Scenes"));
        assert!(index.asset_exists("Assets/Scenes/Main.unity"));
        assert!(!index.folder_exists("Assets/Scenes/Main.unity"));
        assert!(!index.asset_exists("Assets/Scenes.meta"));
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_snapshot_follows_move_when_meta_is_stuck() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();
        // a directory in the sidecar's place makes the .meta rename fail
        fs::create_dir_all(dir.path().join("Assets/_Scenes.meta/blocker")).unwrap();

        let err = index.rename("Assets/Scenes", "_Scenes").unwrap_err();

        assert!(matches!(err, IndexError::Io { .. }));
        assert!(dir.path().join("Assets/_Scenes/Main.unity").is_file());
        assert!(index.folder_exists("Assets/_Scenes"));
        assert!(index.asset_exists("Assets/_Scenes/Main.unity"));
        assert!(!index.folder_exists("Assets/Scenes"));
    }

    #[test]
    fn test_queries_are_stale_until_refresh() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();

        fs::create_dir_all(dir.path().join("Assets/_Project")).unwrap();
        assert!(!index.folder_exists("Assets/_Project"));

        index.refresh().unwrap();
        assert!(index.folder_exists("Assets/_Project"));
    }

    #[test]
    fn test_rename_moves_meta_and_children() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();

        index.rename("Assets/Scenes", "_Scenes").unwrap();

        let assets = dir.path().join(ASSETS_ROOT);
        assert!(assets.join("_Scenes/Main.unity").is_file());
        assert!(assets.join("_Scenes.meta").is_file());
        assert!(!assets.join("Scenes").exists());
        assert!(!assets.join("Scenes.meta").exists());
        assert!(index.asset_exists("Assets/_Scenes/Main.unity"));
        assert!(!index.asset_exists("Assets/Scenes/Main.unity"));
    }

    #[test]
    fn test_rename_missing_is_not_found() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();
        let err = index.rename("Assets/Nope", "Other").unwrap_err();
        assert!(matches!(err, IndexError::NotFound { .. }));
    }

    #[test]
    fn test_rename_onto_existing_is_rejected() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();
        let err = index.rename("Assets/Scenes", "Settings").unwrap_err();
        assert!(matches!(err, IndexError::AlreadyExists { .. }));
        assert!(dir.path().join("Assets/Scenes").is_dir());
    }

    #[test]
    fn test_move_requires_known_parent() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();
        fs::create_dir_all(dir.path().join("Assets/_Project")).unwrap();

        let err = index
            .move_asset("Assets/Settings", "Assets/_Project/Settings")
            .unwrap_err();
        assert!(matches!(err, IndexError::MissingParent { .. }));

        index.refresh().unwrap();
        index
            .move_asset("Assets/Settings", "Assets/_Project/Settings")
            .unwrap();
        assert!(index.folder_exists("Assets/_Project/Settings"));
        assert!(dir.path().join("Assets/_Project/Settings").is_dir());
    }

    #[test]
    fn test_move_into_itself_rejected() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();
        let err = index
            .move_asset("Assets/Scenes", "Assets/Scenes/Nested")
            .unwrap_err();
        assert!(matches!(err, IndexError::InvalidPath { .. }));
    }

    #[test]
    fn test_delete_folder_and_meta() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();

        index.delete("Assets/Scenes").unwrap();

        assert!(!dir.path().join("Assets/Scenes").exists());
        assert!(!dir.path().join("Assets/Scenes.meta").exists());
        assert!(!index.asset_exists("Assets/Scenes"));
        assert!(!index.asset_exists("Assets/Scenes/Main.unity"));
        // siblings sharing the prefix survive
        assert!(index.folder_exists("Assets/Settings"));
    }

    #[test]
    fn test_delete_file() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();
        index.delete("Assets/Readme.asset").unwrap();
        assert!(!dir.path().join("Assets/Readme.asset").exists());
    }

    #[test]
    fn test_copy_from_outside_assets() {
        let dir = project();
        fs::create_dir_all(dir.path().join("Packages/z")).unwrap();
        fs::write(dir.path().join("Packages/z/PF.prefab"), "prefab").unwrap();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();

        index
            .copy("Packages/z/PF.prefab", "Assets/Settings/PF.prefab")
            .unwrap();

        assert!(index.asset_exists("Assets/Settings/PF.prefab"));
        assert_eq!(
            fs::read_to_string(dir.path().join("Assets/Settings/PF.prefab")).unwrap(),
            "prefab"
        );
        assert!(dir.path().join("Packages/z/PF.prefab").exists());
    }

    #[test]
    fn test_paths_outside_assets_rejected() {
        let dir = project();
        let mut index = FsAssetIndex::open(dir.path()).unwrap();

        for bad in ["Assets", "Library/x", "Assets/../x", "/Assets/x", "Assets\\x"] {
            assert!(
                matches!(index.delete(bad), Err(IndexError::InvalidPath { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_project_without_assets_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = FsAssetIndex::open(dir.path()).unwrap();
        assert!(index.is_empty());
    }
}
