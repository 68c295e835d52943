//! Project structure initializer.
//!
//! Folders are created straight on disk; renames, moves and deletes go through
//! the [`AssetIndex`](crate::index::AssetIndex), which must be refreshed between
//! phases so that later steps see what earlier ones created.

pub mod actions;
pub mod folders;
pub mod plan;

pub use actions::{execute_plan, execute_step, StructureReport};
pub use folders::{create_folders, FolderSpec};
pub use plan::{services_resources_path, StructurePlan, StructureStep};
