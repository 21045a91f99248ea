use anyhow::{Context, Result};
use cluster_balance::ServiceConfig;
use std::{env, fs, path::Path};

pub const CONFIG_ENV: &str = "CLUSTER_BALANCE_CONFIG";
pub const BIND_ENV: &str = "BIND";
pub const DEFAULT_BIND: &str = "0.0.0.0:8086";

/// Reads the TOML file named by `CLUSTER_BALANCE_CONFIG`, or the built-in
/// defaults when the variable is unset.
pub fn load() -> Result<ServiceConfig> {
    match env::var_os(CONFIG_ENV) {
        Some(path) => load_from(Path::new(&path)),
        None => Ok(ServiceConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: ServiceConfig = toml::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn bind_address() -> String {
    env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string())
}
