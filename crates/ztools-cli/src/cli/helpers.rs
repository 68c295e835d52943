use tracing::debug;
use ztools_core::ZtoolsConfig;

use super::args::GlobalArgs;

/// Config file (or defaults) with `ZTOOLS_*` environment overrides applied.
pub fn load_config(global: &GlobalArgs) -> anyhow::Result<ZtoolsConfig> {
    let path = global.config_path();
    if global.config.is_some() && !path.exists() {
        anyhow::bail!("config file {} does not exist", path.display());
    }
    let mut config = ZtoolsConfig::load_or_default(&path)?;
    config.apply_env()?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}
