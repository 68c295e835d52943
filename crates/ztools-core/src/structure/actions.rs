use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use super::folders::create_folders;
use super::plan::{StructurePlan, StructureStep};
use crate::error::{StructureError, StructureResult};
use crate::index::{AssetIndex, ASSETS_ROOT};

/// What a plan run changed and which best-effort steps failed.
#[derive(Debug, Default)]
pub struct StructureReport {
    /// Folders created on disk.
    pub created: Vec<PathBuf>,
    /// Index operations that changed the project.
    pub applied: Vec<String>,
    /// Conditional steps skipped because the project was already in shape.
    pub skipped: Vec<String>,
    /// Logged failures; the run continued past them.
    pub failures: Vec<String>,
}

impl StructureReport {
    fn failed(&mut self, step: &StructureStep, message: String) {
        self.failures.push(format!("{step}: {message}"));
    }
}

/// Execute one step. Only folder creation and refresh failures are returned;
/// index edits that fail are logged and recorded in `report`.
pub fn execute_step(
    step: &StructureStep,
    project_root: &Path,
    index: &mut dyn AssetIndex,
    report: &mut StructureReport,
) -> StructureResult<()> {
    match step {
        StructureStep::CreateFolders(spec) => {
            let created = create_folders(&project_root.join(ASSETS_ROOT), spec)?;
            report.created.extend(created);
        }
        StructureStep::RenameFolder { name, new_name } => {
            let path = format!("{ASSETS_ROOT}/{name}");
            if !index.folder_exists(&path) {
                debug!(folder = %path, "nothing to rename");
                report.skipped.push(step.to_string());
                return Ok(());
            }
            match index.rename(&path, new_name) {
                Ok(()) => report.applied.push(step.to_string()),
                Err(e) => {
                    error!(folder = %path, error = %e, "failed to rename folder");
                    report.failed(step, e.to_string());
                }
            }
        }
        StructureStep::MoveFolder { name, new_parent } => {
            let from = format!("{ASSETS_ROOT}/{name}");
            if !index.folder_exists(&from) {
                debug!(folder = %from, "nothing to move");
                report.skipped.push(step.to_string());
                return Ok(());
            }
            let to = format!("{ASSETS_ROOT}/{new_parent}/{name}");
            match index.move_asset(&from, &to) {
                Ok(()) => report.applied.push(step.to_string()),
                Err(e) => {
                    error!(folder = %from, error = %e, "failed to move folder");
                    report.failed(step, e.to_string());
                }
            }
        }
        StructureStep::DeleteFolder { name } => {
            let path = format!("{ASSETS_ROOT}/{name}");
            if !index.folder_exists(&path) {
                report.skipped.push(step.to_string());
                return Ok(());
            }
            match index.delete(&path) {
                Ok(()) => report.applied.push(step.to_string()),
                Err(e) => {
                    warn!(folder = %path, error = %e, "failed to delete folder");
                    report.failed(step, e.to_string());
                }
            }
        }
        StructureStep::MoveAsset { from, to }
            if !index.asset_exists(from) && index.asset_exists(to) =>
        {
            debug!(asset = %to, "already moved");
            report.skipped.push(step.to_string());
        }
        StructureStep::DeleteAsset { path } if !index.asset_exists(path) => {
            debug!(asset = %path, "nothing to delete");
            report.skipped.push(step.to_string());
        }
        StructureStep::MoveAsset { from, to } => match index.move_asset(from, to) {
            Ok(()) => report.applied.push(step.to_string()),
            Err(e) => {
                warn!(asset = %from, error = %e, "failed to move asset");
                report.failed(step, e.to_string());
            }
        },
        StructureStep::DeleteAsset { path } => match index.delete(path) {
            Ok(()) => report.applied.push(step.to_string()),
            Err(e) => {
                warn!(asset = %path, error = %e, "failed to delete asset");
                report.failed(step, e.to_string());
            }
        },
        StructureStep::CopyAsset { from, to } => match index.copy(from, to) {
            Ok(()) => report.applied.push(step.to_string()),
            Err(e) => {
                warn!(asset = %from, error = %e, "failed to copy asset");
                report.failed(step, e.to_string());
            }
        },
        StructureStep::Refresh => index.refresh().map_err(StructureError::Refresh)?,
    }
    Ok(())
}

/// Execute every step in order.
pub fn execute_plan(
    plan: &StructurePlan,
    project_root: &Path,
    index: &mut dyn AssetIndex,
) -> StructureResult<StructureReport> {
    let mut report = StructureReport::default();
    for step in &plan.steps {
        execute_step(step, project_root, index, &mut report)?;
    }
    Ok(report)
}
