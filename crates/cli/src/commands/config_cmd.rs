//! `drift config` — Configuration management commands.

use std::path::Path;

use drift_client::ClientConfig;
use serde_json::json;

use super::print_json;

/// Print the effective configuration with the API key redacted.
pub fn show(config: &ClientConfig, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&json!({
        "configPath": path.display().to_string(),
        "configFileExists": path.exists(),
        "baseUrl": config.base_url,
        "apiKey": config.api_key.as_ref().map(|_| "[REDACTED]"),
        "timeoutMs": config.timeout_ms,
        "hosted": config.hosted,
        "pathPrefixMode": format!("{:?}", config.path_prefix_mode()),
    }))
}

pub fn path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", path.display());
    Ok(())
}

/// Write the default config file, refusing to clobber one unless `force`.
pub fn init(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, ClientConfig::default_toml())?;
    println!("Created {}", path.display());
    Ok(())
}
