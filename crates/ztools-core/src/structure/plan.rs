use std::fmt;

use super::folders::FolderSpec;
use crate::config::StructureConfig;
use crate::index::ASSETS_ROOT;

pub const SERVICES_FOLDER: &str = "Services";
pub const SERVICES_ASSETS_FOLDER: &str = "ServiceAssets";
pub const EVENT_CHANNEL_SO_FOLDER: &str = "EventChannelSOs";
pub const SOUND_DATA_SO_FOLDER: &str = "SoundDataSOs";
pub const DEFAULT_STUFF_FOLDER: &str = "_DefaultStuffTodoRemove";

const INPUT_ACTIONS_ASSET: &str = "InputSystem_Actions.inputactions";
const README_ASSET: &str = "Readme.asset";

/// `Services/ServiceAssets/Resources`, relative to the project folder.
pub fn services_resources_path() -> String {
    format!("{SERVICES_FOLDER}/{SERVICES_ASSETS_FOLDER}/Resources")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureStep {
    /// Create folders directly on disk; the index does not see them until refreshed.
    CreateFolders(FolderSpec),
    /// Rename top-level folder `Assets/{name}` if it exists.
    RenameFolder { name: String, new_name: String },
    /// Move top-level folder `Assets/{name}` to `Assets/{new_parent}/{name}` if it exists.
    MoveFolder { name: String, new_parent: String },
    /// Delete top-level folder `Assets/{name}` if it exists.
    DeleteFolder { name: String },
    /// Move an asset; skipped when it already sits at `to`.
    MoveAsset { from: String, to: String },
    /// Delete an asset if present.
    DeleteAsset { path: String },
    /// Copy a project file into `Assets/`.
    CopyAsset { from: String, to: String },
    /// Re-synchronise the asset index with the disk.
    Refresh,
}

impl fmt::Display for StructureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFolders(spec) => {
                let root = if spec.root.is_empty() {
                    ASSETS_ROOT.to_string()
                } else {
                    format!("{ASSETS_ROOT}/{}", spec.root)
                };
                write!(f, "create {} folder(s) under {root}", spec.folders.len())
            }
            Self::RenameFolder { name, new_name } => {
                write!(f, "rename {ASSETS_ROOT}/{name} -> {new_name}")
            }
            Self::MoveFolder { name, new_parent } => {
                write!(f, "move {ASSETS_ROOT}/{name} -> {ASSETS_ROOT}/{new_parent}/{name}")
            }
            Self::DeleteFolder { name } => write!(f, "delete {ASSETS_ROOT}/{name}"),
            Self::MoveAsset { from, to } => write!(f, "move {from} -> {to}"),
            Self::DeleteAsset { path } => write!(f, "delete {path}"),
            Self::CopyAsset { from, to } => write!(f, "copy {from} -> {to}"),
            Self::Refresh => f.write_str("refresh asset index"),
        }
    }
}

/// Ordered steps that turn a template project into the target layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructurePlan {
    pub steps: Vec<StructureStep>,
}

impl StructurePlan {
    pub fn push(&mut self, step: StructureStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Layout for a project created from the default 3D template.
    pub fn default_layout(config: &StructureConfig) -> Self {
        let project = config.project_folder.as_str();
        let resources = services_resources_path();
        let mut plan = Self::default();

        plan.push(StructureStep::CreateFolders(FolderSpec::new(
            project,
            [
                "_Art/Audio".to_string(),
                "_Art/Fonts".to_string(),
                "_Art/Materials".to_string(),
                "_Art/Models".to_string(),
                "_Art/Shaders".to_string(),
                "_Art/Sprites".to_string(),
                "_Art/Textures".to_string(),
                DEFAULT_STUFF_FOLDER.to_string(),
                "Common/ClassesAndStructs".to_string(),
                "Common/Enums".to_string(),
                "Common/Interfaces".to_string(),
                "Managers".to_string(),
                format!("{resources}/{EVENT_CHANNEL_SO_FOLDER}"),
                format!("{resources}/{SOUND_DATA_SO_FOLDER}"),
                format!("{SERVICES_FOLDER}/Audio"),
                format!("{SERVICES_FOLDER}/EventChannels"),
                format!("{SERVICES_FOLDER}/Input"),
                format!("{SERVICES_FOLDER}/DataPersistence"),
                format!("{SERVICES_FOLDER}/Time"),
                format!("{SERVICES_FOLDER}/GlobalVariable"),
                "Systems".to_string(),
                "UI/Configs".to_string(),
                "UI/Prefabs".to_string(),
                "Utils".to_string(),
            ],
        )))
        .push(StructureStep::CreateFolders(FolderSpec::new(
            "",
            [
                "Editor",
                "External",
                "QuickTest",
                "Resources",
                "SandboxDevelopment",
            ],
        )))
        .push(StructureStep::RenameFolder {
            name: "Scenes".to_string(),
            new_name: "_Scenes".to_string(),
        })
        .push(StructureStep::Refresh)
        .push(StructureStep::MoveFolder {
            name: "_Scenes".to_string(),
            new_parent: project.to_string(),
        })
        .push(StructureStep::MoveFolder {
            name: "Settings".to_string(),
            new_parent: project.to_string(),
        })
        .push(StructureStep::DeleteFolder {
            name: "TutorialInfo".to_string(),
        })
        .push(StructureStep::Refresh)
        .push(StructureStep::MoveAsset {
            from: format!("{ASSETS_ROOT}/{INPUT_ACTIONS_ASSET}"),
            to: format!("{ASSETS_ROOT}/{project}/{DEFAULT_STUFF_FOLDER}/{INPUT_ACTIONS_ASSET}"),
        })
        .push(StructureStep::DeleteAsset {
            path: format!("{ASSETS_ROOT}/{README_ASSET}"),
        })
        .push(StructureStep::Refresh);

        if let Some(prefab) = &config.persistent_prefab {
            let file_name = prefab.rsplit(['/', '\\']).next().unwrap_or(prefab);
            plan.push(StructureStep::CopyAsset {
                from: prefab.clone(),
                to: format!("{ASSETS_ROOT}/{project}/{resources}/{file_name}"),
            })
            .push(StructureStep::Refresh);
        }

        plan
    }
}
