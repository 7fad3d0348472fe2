//! Mobile bootstrap configuration loaded from generated JSON.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use rastgele_core::config::{parse_bootstrap_config, BootstrapConfig, ShellConfig};
#[cfg(test)]
use rastgele_core::config::ShellEnv;

const GENERATED_BOOTSTRAP: &str = include_str!(concat!(env!("OUT_DIR"), "/mobile-bootstrap.json"));

/// Loads the generated mobile bootstrap JSON from `OUT_DIR`.
pub fn load_bootstrap_config() -> BootstrapConfig {
    match parse_bootstrap_config(GENERATED_BOOTSTRAP) {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!("Failed to parse mobile bootstrap config: {}", error);
            BootstrapConfig::default()
        }
    }
}

/// Effective shell configuration: runtime environment over build-time values.
pub fn resolve_shell_config() -> ShellConfig {
    let config = ShellConfig::from_env(&load_bootstrap_config());
    tracing::info!(
        "Home page {}, random article endpoint {}, theme strategy {}",
        config.home_url,
        config.article_api_url.as_deref().unwrap_or("not configured"),
        config.theme_strategy.as_str()
    );
    config
}
