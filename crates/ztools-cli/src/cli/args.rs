use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ztools_core::CONFIG_FILE_NAME;

#[derive(Parser)]
#[command(
    name = "ztools",
    version,
    about = "Bootstrap a new Unity project: packages, Asset Store imports, folder layout"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Unity project root (the folder that contains Assets/)
    #[arg(long, global = true, default_value = ".", env = "ZTOOLS_PROJECT")]
    pub project: PathBuf,

    /// Config file [default: <project>/ztools.yaml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.project.join(CONFIG_FILE_NAME))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// New project initialization
    Init(InitArgs),
    Version,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    #[command(subcommand)]
    pub cmd: InitCmd,
}

#[derive(Subcommand, Debug)]
pub enum InitCmd {
    /// Install essential packages, one at a time
    Packages(PackagesArgs),
    /// Import essential Asset Store packages
    Assets(AssetsArgs),
    /// Create the default project structure
    Structure(StructureArgs),
    /// Write a ztools.yaml with the built-in defaults
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct PackagesArgs {
    /// Print the install order and exit
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AssetsArgs {
    /// Print where each package is looked up and whether it is there
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct StructureArgs {
    /// Print the plan without touching the project
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ztools",
            "init",
            "structure",
            "--project",
            "/tmp/game",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.global.project, PathBuf::from("/tmp/game"));
        assert_eq!(
            cli.global.config_path(),
            PathBuf::from("/tmp/game").join(CONFIG_FILE_NAME)
        );
        match cli.cmd {
            Command::Init(InitArgs {
                cmd: InitCmd::Structure(args),
            }) => assert!(args.dry_run),
            _ => panic!("expected init structure"),
        }
    }

    #[test]
    fn test_explicit_config_path() {
        let cli = Cli::try_parse_from(["ztools", "--config", "other.yaml", "init", "packages"])
            .unwrap();
        assert_eq!(cli.global.config_path(), PathBuf::from("other.yaml"));
    }

    #[test]
    fn test_init_requires_subcommand() {
        assert!(Cli::try_parse_from(["ztools", "init"]).is_err());
    }
}
