//! `ztools init …`: the new-project initialization steps.

use crate::cli::args::{GlobalArgs, InitArgs, InitCmd};

pub mod assets;
pub mod config;
pub mod packages;
pub mod structure;

pub async fn run(global: &GlobalArgs, args: InitArgs) -> anyhow::Result<i32> {
    match args.cmd {
        InitCmd::Packages(a) => packages::run(global, a).await,
        InitCmd::Assets(a) => assets::run(global, a).await,
        InitCmd::Structure(a) => structure::run(global, a),
        InitCmd::Config(a) => config::run(global, a),
    }
}
