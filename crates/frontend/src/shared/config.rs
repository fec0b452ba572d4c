//! Application configuration
//!
//! A default TOML document is embedded in the bundle. The API base can be
//! overridden at build time with `CLASSLINK_API_BASE`.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Absolute base such as "https://campus.example.edu". Empty means
    /// "same host as the page, on `port`".
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RetryConfig {
    /// Extra attempts for the department list after the first one
    pub department_retries: u32,
    pub delay_ms: u32,
}

fn default_port() -> u16 {
    8080
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 8080

[retry]
department_retries = 2
delay_ms = 1500
"#;

/// Parse a configuration document, applying the build-time override
pub fn parse_config(contents: &str, base_override: Option<&str>) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(contents)?;
    if let Some(base) = base_override.map(str::trim).filter(|b| !b.is_empty()) {
        config.api.base_url = base.trim_end_matches('/').to_string();
    }
    Ok(config)
}

fn load_config() -> Config {
    let base_override = option_env!("CLASSLINK_API_BASE");
    match parse_config(DEFAULT_CONFIG, base_override) {
        Ok(config) => {
            log::debug!("Loaded config: {:?}", config);
            config
        }
        Err(e) => {
            log::error!("Embedded config is invalid, using hardcoded defaults: {}", e);
            Config {
                api: ApiConfig {
                    base_url: base_override.unwrap_or_default().to_string(),
                    port: default_port(),
                },
                retry: RetryConfig {
                    department_retries: 2,
                    delay_ms: 1500,
                },
            }
        }
    }
}

static CONFIG: Lazy<Config> = Lazy::new(load_config);

/// Process-wide configuration, parsed on first use
pub fn config() -> &'static Config {
    &CONFIG
}
