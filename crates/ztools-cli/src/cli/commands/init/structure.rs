use ztools_core::index::ASSETS_ROOT;
use ztools_core::structure::execute_plan;
use ztools_core::{FsAssetIndex, StructurePlan};

use crate::cli::args::{GlobalArgs, StructureArgs};
use crate::cli::helpers::load_config;
use crate::exit_codes;

pub fn run(global: &GlobalArgs, args: StructureArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;
    let plan = StructurePlan::default_layout(&config.structure);

    if args.dry_run {
        for (i, step) in plan.steps.iter().enumerate() {
            println!("  {:>2}. {step}", i + 1);
        }
        return Ok(exit_codes::EXIT_SUCCESS);
    }

    if !global.project.join(ASSETS_ROOT).is_dir() {
        anyhow::bail!(
            "{} is not a Unity project (no {ASSETS_ROOT} folder)",
            global.project.display()
        );
    }

    println!("🏗️  Creating project structure...");
    let mut index = FsAssetIndex::open(&global.project)?;
    let report = execute_plan(&plan, &global.project, &mut index)?;

    for step in &report.applied {
        println!("   {step}");
    }
    for failure in &report.failures {
        println!("   ⚠️  {failure}");
    }
    println!(
        "✅  Created {} folder(s), applied {} change(s), {} warning(s).",
        report.created.len(),
        report.applied.len(),
        report.failures.len()
    );
    Ok(exit_codes::EXIT_SUCCESS)
}
