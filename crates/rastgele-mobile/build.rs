use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Default, Serialize)]
struct MobileBootstrapConfig {
    home_url: Option<String>,
    article_api_url: Option<String>,
    theme_strategy: Option<String>,
    theme_targets: Option<serde_json::Value>,
}

fn main() {
    println!("cargo:rerun-if-env-changed=RASTGELE_HOME_URL");
    println!("cargo:rerun-if-env-changed=RASTGELE_ARTICLE_API_URL");
    println!("cargo:rerun-if-env-changed=RASTGELE_THEME_STRATEGY");
    println!("cargo:rerun-if-env-changed=RASTGELE_THEME_TARGETS");

    if let Err(error) = write_mobile_bootstrap_config() {
        println!("cargo:warning=failed to generate mobile bootstrap config: {error}");
    }
}

fn write_mobile_bootstrap_config() -> io::Result<()> {
    load_workspace_dotenv();

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    let config = MobileBootstrapConfig {
        home_url: env_var_trimmed("RASTGELE_HOME_URL"),
        article_api_url: env_var_trimmed("RASTGELE_ARTICLE_API_URL"),
        theme_strategy: env_var_trimmed("RASTGELE_THEME_STRATEGY"),
        theme_targets: theme_targets_from_env(),
    };

    let content = serde_json::to_string_pretty(&config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    fs::write(out_dir.join("mobile-bootstrap.json"), content)?;
    Ok(())
}

fn load_workspace_dotenv() {
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let workspace_env = manifest_dir.join("..").join("..").join(".env");

    if workspace_env.exists() {
        println!("cargo:rerun-if-changed={}", workspace_env.display());
        let _ = dotenvy::from_path(workspace_env);
    }
}

/// `RASTGELE_THEME_TARGETS` holds a JSON object with selector overrides.
fn theme_targets_from_env() -> Option<serde_json::Value> {
    let raw = env_var_trimmed("RASTGELE_THEME_TARGETS")?;
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => {
            println!("cargo:warning=RASTGELE_THEME_TARGETS must be a JSON object; ignoring it");
            None
        }
        Err(error) => {
            println!("cargo:warning=RASTGELE_THEME_TARGETS is not valid JSON: {error}");
            None
        }
    }
}

fn env_var_trimmed(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
