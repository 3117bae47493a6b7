use anyhow::Context;
use rvw_config::RvwConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RvwConfig> {
    load_dotenv()?;

    let mut config = RvwConfig::load().context("failed to load rvw configuration")?;
    apply_overrides(&mut config, flags)?;
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

fn apply_overrides(config: &mut RvwConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(api_url) = &flags.api_url {
        config.api.base_url.clone_from(api_url);
        config
            .validate()
            .with_context(|| format!("invalid --api-url '{api_url}'"))?;
    }
    Ok(())
}
