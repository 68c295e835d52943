use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StructureError, StructureResult};

/// A root folder plus relative hierarchies to create below it.
///
/// Hierarchies are `/`-separated (`_Art/Audio`); `\` is accepted too. An empty
/// root means the `Assets` folder itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSpec {
    pub root: String,
    pub folders: Vec<String>,
}

impl FolderSpec {
    pub fn new<I, S>(root: impl Into<String>, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            folders: folders.into_iter().map(Into::into).collect(),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty())
}

fn ensure_dir(path: &Path, created: &mut Vec<PathBuf>) -> StructureResult<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir(path).map_err(|source| StructureError::CreateFolder {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "created folder");
    created.push(path.to_path_buf());
    Ok(())
}

/// Create the root and every missing segment of every hierarchy below
/// `assets_dir`. Existing folders are left alone. Returns the folders that
/// were actually created, parents before children.
pub fn create_folders(assets_dir: &Path, spec: &FolderSpec) -> StructureResult<Vec<PathBuf>> {
    let mut created = Vec::new();

    let mut root = assets_dir.to_path_buf();
    ensure_dir(&root, &mut created)?;
    for segment in segments(&spec.root) {
        root.push(segment);
        ensure_dir(&root, &mut created)?;
    }

    for hierarchy in &spec.folders {
        let mut current = root.clone();
        for segment in segments(hierarchy) {
            current.push(segment);
            ensure_dir(&current, &mut created)?;
        }
    }

    Ok(created)
}
