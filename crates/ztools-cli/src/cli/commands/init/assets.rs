use ztools_core::{
    AssetImporter, EditorCommandImporter, PackageImporter, Platform, StagingImporter,
};

use crate::cli::args::{AssetsArgs, GlobalArgs};
use crate::cli::helpers::load_config;
use crate::exit_codes;

pub async fn run(global: &GlobalArgs, args: AssetsArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let cache_root = config.assets.resolve_cache_root(Platform::current())?;

    if args.dry_run {
        println!("Asset Store cache: {}", cache_root.display());
        for asset in &config.assets.packages {
            let path = asset.resolve(&cache_root);
            let state = if path.is_file() { "found" } else { "MISSING" };
            println!("   [{state}] {}", path.display());
        }
        return Ok(exit_codes::EXIT_SUCCESS);
    }

    let importer: Box<dyn PackageImporter> = match &config.assets.editor {
        Some(editor) => Box::new(EditorCommandImporter::new(editor, &global.project)),
        None => {
            let staging = StagingImporter::for_project(&global.project);
            println!(
                "ℹ️  No Unity editor configured; packages are staged in {}",
                staging.staging_dir().display()
            );
            Box::new(staging)
        }
    };
    let importer = AssetImporter::new(cache_root, importer);

    for asset in &config.assets.packages {
        match importer.import(asset).await {
            Ok(path) => println!("   Imported {}", path.display()),
            Err(e) if e.is_not_found() => {
                eprintln!("error: {e}");
                return Ok(exit_codes::EXIT_ASSET_NOT_FOUND);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("✅  Imported {} package(s).", config.assets.packages.len());
    Ok(exit_codes::EXIT_SUCCESS)
}
