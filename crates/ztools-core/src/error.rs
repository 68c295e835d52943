//! Error types for the bootstrap engine.

use std::path::PathBuf;

/// Errors reported by a package registry client.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Authentication failed or token invalid.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The registry does not know the request handle.
    #[error("install request not found: {request}")]
    RequestNotFound { request: String },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Invalid response from registry.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl RegistryError {
    /// Whether the request may still succeed if asked again. Only transport
    /// failures qualify; the registry's own answers are final.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Asset Store import errors.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The package file is not in the local Asset Store cache.
    #[error("the asset package was not found at the path: {}", path.display())]
    NotFound { path: PathBuf },

    /// The cache root could not be derived for this platform.
    #[error("cannot resolve Asset Store cache root: {reason}")]
    CacheRootUnavailable { reason: String },

    /// The importer ran but reported failure.
    #[error("import of {} failed: {message}", path.display())]
    ImportFailed { path: PathBuf, message: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetError {
    /// Whether the error means the package was never downloaded.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for asset imports.
pub type AssetResult<T> = Result<T, AssetError>;

/// Asset index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("invalid asset path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("asset not found: {path}")]
    NotFound { path: String },

    #[error("destination already exists: {path}")]
    AlreadyExists { path: String },

    #[error("destination folder does not exist: {path}")]
    MissingParent { path: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for asset index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Structure initializer errors. Only folder creation and index refresh are fatal.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    #[error("failed to create folder {}: {source}", path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset index refresh failed: {0}")]
    Refresh(#[source] IndexError),
}

/// Result type for structure operations.
pub type StructureResult<T> = Result<T, StructureError>;
