//! Tool configuration (`ztools.yaml`).
//!
//! Every field is optional; a missing file or missing section falls back to
//! the built-in project defaults. Environment variables are applied on top of
//! the file:
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `ZTOOLS_REGISTRY_URL` | Package registry base URL |
//! | `ZTOOLS_REGISTRY_TOKEN` | Registry bearer token |
//! | `ZTOOLS_REGISTRY_TIMEOUT` | Request timeout in seconds |
//! | `ZTOOLS_ASSET_STORE_CACHE_ROOT` | Asset Store cache root override (Windows) |
//! | `ZTOOLS_UNITY_EDITOR` | Unity editor executable used for imports |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::AssetDescriptor;
use crate::error::ConfigError;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "ztools.yaml";

pub const ENV_REGISTRY_URL: &str = "ZTOOLS_REGISTRY_URL";
pub const ENV_REGISTRY_TOKEN: &str = "ZTOOLS_REGISTRY_TOKEN";
pub const ENV_REGISTRY_TIMEOUT: &str = "ZTOOLS_REGISTRY_TIMEOUT";
pub const ENV_CACHE_ROOT_OVERRIDE: &str = "ZTOOLS_ASSET_STORE_CACHE_ROOT";
pub const ENV_UNITY_EDITOR: &str = "ZTOOLS_UNITY_EDITOR";

/// Packages installed by `init packages`, in dependency order.
pub const DEFAULT_PACKAGES: &[&str] = &[
    // unity packages
    "com.unity.addressables",
    "com.unity.cinemachine",
    // Z packages; ZUtils pulls in com.unity.nuget.newtonsoft-json
    "git+https://github.com/deadwronggames/ZConstants.git",
    "git+https://github.com/deadwronggames/ZUtils.git",
    "git+https://github.com/deadwronggames/ZCommon.git",
    "git+https://github.com/deadwronggames/ZServices.git",
    "git+https://github.com/deadwronggames/ZModularUI.git",
];

/// Asset Store packages imported by `init assets`: (file name, cache sub-folder).
pub const DEFAULT_ASSETS: &[(&str, &str)] = &[
    (
        "OdinInspectorValidatorSerializer_Education_v3.3.1.13.unitypackage",
        "Sirenix/Education",
    ),
    (
        "Audio Preview Tool.unitypackage",
        "Warped Imagination/Editor ExtensionsAudio",
    ),
    (
        "DOTween HOTween v2.unitypackage",
        "Demigiant/Editor ExtensionsAnimation",
    ),
];

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZtoolsConfig {
    /// Package identifiers, installed in list order.
    pub packages: Vec<String>,

    /// Installer timing.
    pub installer: InstallerConfig,

    /// Package registry connection.
    pub registry: RegistryConfig,

    /// Asset Store imports.
    pub assets: AssetsConfig,

    /// Project layout.
    pub structure: StructureConfig,
}

impl Default for ZtoolsConfig {
    fn default() -> Self {
        Self {
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
            installer: InstallerConfig::default(),
            registry: RegistryConfig::default(),
            assets: AssetsConfig::default(),
            structure: StructureConfig::default(),
        }
    }
}

impl ZtoolsConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the config file if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Apply `ZTOOLS_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_REGISTRY_URL) {
            self.registry.url = url;
        }
        if let Some(token) = get(ENV_REGISTRY_TOKEN) {
            self.registry.token = Some(token);
        }
        if let Some(timeout) = get(ENV_REGISTRY_TIMEOUT) {
            self.registry.timeout_secs =
                timeout.parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_REGISTRY_TIMEOUT.to_string(),
                    value: timeout.clone(),
                })?;
        }
        if let Some(root) = get(ENV_CACHE_ROOT_OVERRIDE) {
            self.assets.cache_root_override = Some(PathBuf::from(root));
        }
        if let Some(editor) = get(ENV_UNITY_EDITOR) {
            self.assets.editor = Some(PathBuf::from(editor));
        }
        Ok(())
    }
}

/// Timing of the sequential package installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// Delay between two status polls of the in-flight request.
    pub poll_interval_ms: u64,

    /// Pause after a request finished before the next one is submitted.
    pub cooldown_ms: u64,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            cooldown_ms: 1000,
        }
    }
}

impl InstallerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Base URL for the registry.
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Authentication token.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_registry_url() -> String {
    "http://127.0.0.1:7070/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl RegistryConfig {
    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Asset Store import configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Explicit cache root; skips platform resolution when set.
    pub cache_root: Option<PathBuf>,

    /// Replacement for the per-user application data directory on Windows.
    pub cache_root_override: Option<PathBuf>,

    /// Unity editor executable. Without it packages are staged in the project.
    pub editor: Option<PathBuf>,

    /// Packages to import, in order.
    pub packages: Vec<AssetDescriptor>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            cache_root: None,
            cache_root_override: None,
            editor: None,
            packages: DEFAULT_ASSETS
                .iter()
                .map(|(name, folder)| AssetDescriptor::new(*name, *folder))
                .collect(),
        }
    }
}

/// Project layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructureConfig {
    /// Folder under `Assets` that holds the project's own content.
    pub project_folder: String,

    /// Project-relative path of a prefab copied into the services resources folder.
    pub persistent_prefab: Option<String>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            project_folder: "_Project".to_string(),
            persistent_prefab: None,
        }
    }
}
