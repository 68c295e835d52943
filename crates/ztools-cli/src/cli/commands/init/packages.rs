use std::sync::Arc;

use anyhow::Context;
use ztools_core::{InstallOutcome, PackageInstaller};
use ztools_registry::HttpRegistryClient;

use crate::cli::args::{GlobalArgs, PackagesArgs};
use crate::cli::helpers::load_config;
use crate::exit_codes;

pub async fn run(global: &GlobalArgs, args: PackagesArgs) -> anyhow::Result<i32> {
    let config = load_config(global)?;

    if config.packages.is_empty() {
        println!("No packages configured.");
        return Ok(exit_codes::EXIT_SUCCESS);
    }

    if args.dry_run {
        println!("Install order:");
        for (i, package) in config.packages.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, package);
        }
        return Ok(exit_codes::EXIT_SUCCESS);
    }

    let client = HttpRegistryClient::new(config.registry.clone())
        .context("failed to create registry client")?;
    println!(
        "📦 Installing {} package(s) via {}",
        config.packages.len(),
        client.base_url()
    );

    let mut installer = PackageInstaller::new(Arc::new(client), config.installer);
    let report = installer.install(&config.packages).await;

    for (request, outcome) in &report.entries {
        match outcome {
            InstallOutcome::Installed { package_id } => println!("   Installed {package_id}"),
            InstallOutcome::Failed { message } => println!("   Failed {request}: {message}"),
        }
    }

    let failed = report.failed().count();
    println!(
        "✅  Done: {} installed, {} failed.",
        report.len() - failed,
        failed
    );
    // individual install failures never fail the run
    Ok(exit_codes::EXIT_SUCCESS)
}
