// Settings loader
// Reads ~/.hardshell/config.toml first, then environment overrides.

use std::fs;

use anyhow::{Context, Result};

use super::settings::Settings;

pub fn load_settings() -> Result<Settings> {
    let mut settings = try_load_from_file()?.unwrap_or_default();

    // Environment takes precedence over the file.
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            settings.api_key = Some(key);
        }
    }
    if let Ok(model) = std::env::var("HARDSHELL_MODEL") {
        if !model.is_empty() {
            settings.model = Some(model);
        }
    }

    Ok(settings)
}

fn try_load_from_file() -> Result<Option<Settings>> {
    #[derive(serde::Deserialize)]
    struct TomlConfig {
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        base_url: Option<String>,
    }

    let home = match dirs::home_dir() {
        Some(home) => home,
        None => return Ok(None),
    };
    let config_path = home.join(".hardshell/config.toml");
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_config: TomlConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(Settings {
        api_key: toml_config.api_key.filter(|k| !k.is_empty()),
        model: toml_config.model,
        base_url: toml_config.base_url,
    }))
}
