//! Shell configuration.
//!
//! Values come from, in order of priority: runtime environment variables,
//! the bootstrap JSON generated at build time from the same variables, and
//! built-in defaults. Blank values are treated as unset.

use serde::{Deserialize, Serialize};

use crate::article::ArticleClient;
use crate::error::{Error, Result};
use crate::theme::{ThemeStrategy, ThemeTargets};
use crate::util::{is_http_url, normalize_text_option};

/// Site shown on launch.
pub const DEFAULT_HOME_URL: &str = "https://eksiseyler.com/";

pub const HOME_URL_ENV: &str = "RASTGELE_HOME_URL";
pub const ARTICLE_API_URL_ENV: &str = "RASTGELE_ARTICLE_API_URL";
pub const THEME_STRATEGY_ENV: &str = "RASTGELE_THEME_STRATEGY";

/// Values baked into the binary by the build script.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub home_url: Option<String>,
    #[serde(default)]
    pub article_api_url: Option<String>,
    #[serde(default)]
    pub theme_strategy: Option<String>,
    #[serde(default)]
    pub theme_targets: Option<ThemeTargets>,
}

/// Parse the generated bootstrap JSON.
pub fn parse_bootstrap_config(raw: &str) -> Result<BootstrapConfig> {
    let config: BootstrapConfig = serde_json::from_str(raw)?;
    Ok(BootstrapConfig {
        home_url: normalize_text_option(config.home_url),
        article_api_url: normalize_text_option(config.article_api_url),
        theme_strategy: normalize_text_option(config.theme_strategy),
        theme_targets: config.theme_targets,
    })
}

/// Runtime environment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellEnv {
    pub home_url: Option<String>,
    pub article_api_url: Option<String>,
    pub theme_strategy: Option<String>,
}

impl ShellEnv {
    pub fn from_process() -> Self {
        Self {
            home_url: std::env::var(HOME_URL_ENV).ok(),
            article_api_url: std::env::var(ARTICLE_API_URL_ENV).ok(),
            theme_strategy: std::env::var(THEME_STRATEGY_ENV).ok(),
        }
    }
}

/// Effective shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub home_url: String,
    pub article_api_url: Option<String>,
    pub theme_strategy: ThemeStrategy,
    pub theme_targets: ThemeTargets,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home_url: DEFAULT_HOME_URL.to_string(),
            article_api_url: None,
            theme_strategy: ThemeStrategy::default(),
            theme_targets: ThemeTargets::default(),
        }
    }
}

impl ShellConfig {
    /// Resolve against the process environment.
    pub fn from_env(bootstrap: &BootstrapConfig) -> Self {
        Self::resolve(bootstrap, ShellEnv::from_process())
    }

    /// Resolve from explicit environment values.
    pub fn resolve(bootstrap: &BootstrapConfig, env: ShellEnv) -> Self {
        let home_url = normalize_text_option(env.home_url)
            .or_else(|| bootstrap.home_url.clone())
            .filter(|url| {
                let valid = is_http_url(url);
                if !valid {
                    tracing::warn!("Ignoring home URL without http(s) scheme: {}", url);
                }
                valid
            })
            .unwrap_or_else(|| DEFAULT_HOME_URL.to_string());

        let article_api_url = normalize_text_option(env.article_api_url)
            .or_else(|| bootstrap.article_api_url.clone())
            .filter(|url| {
                let valid = is_http_url(url);
                if !valid {
                    tracing::warn!("Ignoring article endpoint without http(s) scheme: {}", url);
                }
                valid
            });

        let theme_strategy = normalize_text_option(env.theme_strategy)
            .and_then(|raw| parse_strategy(&raw, THEME_STRATEGY_ENV))
            .or_else(|| {
                bootstrap
                    .theme_strategy
                    .as_deref()
                    .and_then(|raw| parse_strategy(raw, "bootstrap theme_strategy"))
            })
            .unwrap_or_default();

        Self {
            home_url,
            article_api_url,
            theme_strategy,
            theme_targets: bootstrap.theme_targets.clone().unwrap_or_default(),
        }
    }

    pub const fn has_article_api(&self) -> bool {
        self.article_api_url.is_some()
    }

    /// Client for the random article endpoint, if one is configured.
    pub fn article_client(&self) -> Result<ArticleClient> {
        let endpoint = self.article_api_url.as_deref().ok_or_else(|| {
            Error::InvalidInput(format!(
                "Random article endpoint is not configured (set {ARTICLE_API_URL_ENV})"
            ))
        })?;
        ArticleClient::new(endpoint)
    }
}

fn parse_strategy(raw: &str, source: &str) -> Option<ThemeStrategy> {
    match raw.parse() {
        Ok(strategy) => Some(strategy),
        Err(error) => {
            tracing::warn!("Ignoring {}: {}", source, error);
            None
        }
    }
}
