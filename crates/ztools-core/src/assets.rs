//! Asset Store package imports.
//!
//! Purchased packages are downloaded by the editor into a per-user cache:
//!
//! ```text
//! macOS / Linux: ~/Library/Unity/Asset Store-5.x/{publisher}/{category}/{name}.unitypackage
//! Windows:       %APPDATA%/Unity/Asset Store-5.x/{publisher}/{category}/{name}.unitypackage
//! ```
//!
//! A package that is not in the cache is a hard error: it was never bought or
//! never downloaded, and nothing is imported.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AssetsConfig;
use crate::error::{AssetError, AssetResult};

/// Name of the versioned cache folder below the cache root.
pub const ASSET_STORE_FOLDER: &str = "Asset Store-5.x";

/// File extension of Asset Store packages.
pub const PACKAGE_EXTENSION: &str = ".unitypackage";

/// Platform family that decides where the Asset Store cache lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS and other Unix systems.
    Posix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

/// Resolve the Asset Store cache directory.
///
/// `home` is used on POSIX systems, `app_data` (or `override_root` when set)
/// on Windows.
pub fn resolve_cache_root(
    platform: Platform,
    home: Option<&Path>,
    app_data: Option<&Path>,
    override_root: Option<&Path>,
) -> AssetResult<PathBuf> {
    match platform {
        Platform::Posix => {
            let home = home.ok_or_else(|| AssetError::CacheRootUnavailable {
                reason: "home directory is unknown".to_string(),
            })?;
            Ok(home
                .join("Library")
                .join("Unity")
                .join(ASSET_STORE_FOLDER))
        }
        Platform::Windows => {
            let base = match override_root {
                Some(root) => root.to_path_buf(),
                None => app_data
                    .ok_or_else(|| AssetError::CacheRootUnavailable {
                        reason: "application data directory is unknown".to_string(),
                    })?
                    .join("Unity"),
            };
            Ok(base.join(ASSET_STORE_FOLDER))
        }
    }
}

impl AssetsConfig {
    /// Cache root for this machine: the explicit `cache_root`, otherwise the
    /// platform default.
    pub fn resolve_cache_root(&self, platform: Platform) -> AssetResult<PathBuf> {
        if let Some(root) = &self.cache_root {
            return Ok(root.clone());
        }
        resolve_cache_root(
            platform,
            dirs::home_dir().as_deref(),
            dirs::config_dir().as_deref(),
            self.cache_root_override.as_deref(),
        )
    }
}

/// An Asset Store package: file name and cache sub-folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetDescriptor {
    /// Package file name; the `.unitypackage` extension is optional.
    pub name: String,

    /// Folder below the cache root, `/` or `\` separated.
    pub folder: String,
}

impl AssetDescriptor {
    pub fn new(name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: folder.into(),
        }
    }

    /// File name with the package extension.
    pub fn file_name(&self) -> String {
        if self.name.ends_with(PACKAGE_EXTENSION) {
            self.name.clone()
        } else {
            format!("{}{}", self.name, PACKAGE_EXTENSION)
        }
    }

    /// Full path of the package file below `cache_root`.
    pub fn resolve(&self, cache_root: &Path) -> PathBuf {
        let mut path = cache_root.to_path_buf();
        for segment in self
            .folder
            .split(['/', '\\'])
            .filter(|s| !s.is_empty())
        {
            path.push(segment);
        }
        path.push(self.file_name());
        path
    }
}

/// Imports a package file into the project.
#[async_trait]
pub trait PackageImporter: Send + Sync {
    async fn import(&self, package: &Path) -> AssetResult<()>;
}

/// Imports through a headless editor run:
/// `<editor> -batchmode -quit -projectPath <project> -importPackage <file>`.
#[derive(Debug, Clone)]
pub struct EditorCommandImporter {
    editor: PathBuf,
    project_root: PathBuf,
}

impl EditorCommandImporter {
    pub fn new(editor: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            editor: editor.into(),
            project_root: project_root.into(),
        }
    }
}

#[async_trait]
impl PackageImporter for EditorCommandImporter {
    async fn import(&self, package: &Path) -> AssetResult<()> {
        debug!(editor = %self.editor.display(), package = %package.display(), "running editor import");
        let output = tokio::process::Command::new(&self.editor)
            .arg("-batchmode")
            .arg("-quit")
            .arg("-projectPath")
            .arg(&self.project_root)
            .arg("-importPackage")
            .arg(package)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AssetError::ImportFailed {
                path: package.to_path_buf(),
                message: format!("editor exited with {}: {}", output.status, stderr.trim()),
            });
        }
        Ok(())
    }
}

/// Copies package files into a staging folder; the editor imports them on
/// its next start.
#[derive(Debug, Clone)]
pub struct StagingImporter {
    staging_dir: PathBuf,
}

impl StagingImporter {
    /// Staging folder name inside the project root.
    pub const FOLDER: &'static str = "ImportedPackages";

    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(Self::FOLDER))
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }
}

#[async_trait]
impl PackageImporter for StagingImporter {
    async fn import(&self, package: &Path) -> AssetResult<()> {
        let file_name = package.file_name().ok_or_else(|| AssetError::ImportFailed {
            path: package.to_path_buf(),
            message: "package path has no file name".to_string(),
        })?;
        tokio::fs::create_dir_all(&self.staging_dir).await?;
        tokio::fs::copy(package, self.staging_dir.join(file_name)).await?;
        Ok(())
    }
}

/// Finds packages in the Asset Store cache and hands them to an importer.
pub struct AssetImporter {
    cache_root: PathBuf,
    importer: Box<dyn PackageImporter>,
}

impl AssetImporter {
    pub fn new(cache_root: impl Into<PathBuf>, importer: Box<dyn PackageImporter>) -> Self {
        Self {
            cache_root: cache_root.into(),
            importer,
        }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Path of the package file, or `NotFound` if it is not in the cache.
    pub fn locate(&self, asset: &AssetDescriptor) -> AssetResult<PathBuf> {
        let path = asset.resolve(&self.cache_root);
        if !path.is_file() {
            return Err(AssetError::NotFound { path });
        }
        Ok(path)
    }

    /// Import one package. Fails before touching the project if the file is missing.
    pub async fn import(&self, asset: &AssetDescriptor) -> AssetResult<PathBuf> {
        let path = self.locate(asset)?;
        self.importer.import(&path).await?;
        info!(package = %path.display(), "imported");
        Ok(path)
    }

    /// Import packages in order, stopping at the first error.
    pub async fn import_all(&self, assets: &[AssetDescriptor]) -> AssetResult<Vec<PathBuf>> {
        let mut imported = Vec::with_capacity(assets.len());
        for asset in assets {
            imported.push(self.import(asset).await?);
        }
        Ok(imported)
    }
}
