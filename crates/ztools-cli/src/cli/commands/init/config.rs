use std::path::Path;

use crate::cli::args::{ConfigArgs, GlobalArgs};
use crate::exit_codes;
use crate::templates;

pub fn run(global: &GlobalArgs, args: ConfigArgs) -> anyhow::Result<i32> {
    let path = global.config_path();
    if args.force {
        write_file(&path, templates::DEFAULT_CONFIG_YAML)?;
        println!("   Wrote {}", path.display());
    } else {
        write_file_if_missing(&path, templates::DEFAULT_CONFIG_YAML)?;
    }
    Ok(exit_codes::EXIT_SUCCESS)
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))
}

fn write_file_if_missing(path: &Path, content: &str) -> anyhow::Result<()> {
    if path.exists() {
        println!("   Skipped {} (exists)", path.display());
        return Ok(());
    }
    write_file(path, content)?;
    println!("   Created {}", path.display());
    Ok(())
}
