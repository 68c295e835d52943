//! Bootstrap engine for new Unity projects.
//!
//! Three independent jobs, each driven by [`ZtoolsConfig`]:
//!
//! - [`packages`]: install package dependencies one at a time through a
//!   [`RegistryClient`], in list order, continuing past failures
//! - [`assets`]: import purchased Asset Store packages from the local cache
//! - [`structure`]: bring the template project's folders into the house layout
//!
//! # Quick Start
//!
//! ```no_run
//! use ztools_core::index::FsAssetIndex;
//! use ztools_core::structure::{execute_plan, StructurePlan};
//! use ztools_core::ZtoolsConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ZtoolsConfig::default();
//! let plan = StructurePlan::default_layout(&config.structure);
//! let mut index = FsAssetIndex::open("MyGame")?;
//! let report = execute_plan(&plan, "MyGame".as_ref(), &mut index)?;
//! println!("created {} folders", report.created.len());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod index;
pub mod packages;
pub mod structure;

pub use assets::{
    AssetDescriptor, AssetImporter, EditorCommandImporter, PackageImporter, Platform,
    StagingImporter,
};
pub use config::{
    AssetsConfig, InstallerConfig, RegistryConfig, StructureConfig, ZtoolsConfig,
    CONFIG_FILE_NAME,
};
pub use error::{
    AssetError, AssetResult, ConfigError, IndexError, IndexResult, RegistryError, RegistryResult,
    StructureError, StructureResult,
};
pub use index::{AssetIndex, FsAssetIndex};
pub use packages::{
    InstallOutcome, InstallReport, PackageInstaller, PackageRequest, RegistryClient,
    RequestHandle, RequestStatus,
};
pub use structure::{FolderSpec, StructurePlan, StructureReport, StructureStep};
