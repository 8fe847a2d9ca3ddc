use crate::output::OutputFormat;
use crate::paths;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use zdorg_core::{ClientConfig, Environment};

/// Prefix of environment variables that override configuration
pub const ENV_PREFIX: &str = "ZDORG_";

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub zendesk: ZendeskConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ZendeskConfig {
    pub subdomain: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub environment: Environment,
    pub base_url: Option<String>,
    /// Only ever read from the environment, never written to the config file
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NetworkConfig {
    pub timeout_seconds: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: OutputFormat,
    pub color_enabled: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: zdorg_core::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Human,
            color_enabled: true,
        }
    }
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(
        &mut self,
        subdomain: Option<String>,
        api_token: Option<String>,
        environment: Option<Environment>,
    ) {
        if let Some(subdomain) = subdomain {
            self.zendesk.subdomain = Some(subdomain);
        }
        if let Some(api_token) = api_token {
            self.zendesk.api_token = Some(api_token);
        }
        if let Some(environment) = environment {
            self.zendesk.environment = environment;
        }
    }

    /// Client configuration for the core library
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            subdomain: self.zendesk.subdomain.clone(),
            email: self.zendesk.email.clone(),
            api_token: self.zendesk.api_token.clone(),
            environment: self.zendesk.environment,
            base_url: self.zendesk.base_url.clone(),
            timeout_seconds: self.network.timeout_seconds,
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        if is_secret(key) {
            anyhow::bail!("'{key}' is never stored or displayed");
        }

        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not set", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Float(f) => Ok(f.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed_value = validate_config_value(key, value)?;

        // Load existing config or create new
        let mut config: toml::Table = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)
                .with_context(|| format!("Failed to read {}", self.config_path.display()))?;
            toml::from_str(&content)?
        } else {
            toml::Table::new()
        };

        let (section, name) = key
            .split_once('.')
            .ok_or_else(|| anyhow::anyhow!("Invalid key path: {}", key))?;
        match config
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        {
            toml::Value::Table(table) => {
                table.insert(name.to_string(), parsed_value);
            }
            _ => anyhow::bail!("Invalid key path: expected table at '{}'", section),
        }

        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }
}

/// Keys accepted by `config set`
pub const KNOWN_KEYS: &[&str] = &[
    "zendesk.subdomain",
    "zendesk.email",
    "zendesk.environment",
    "zendesk.base_url",
    "network.timeout_seconds",
    "output.default_format",
    "output.color_enabled",
];

fn is_secret(key: &str) -> bool {
    key == "zendesk.api_token"
}

/// Recursively collect all key-value pairs from TOML
fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_values(val, new_prefix, items);
            }
        }
        toml::Value::String(s) => items.push((prefix, s.clone())),
        toml::Value::Integer(i) => items.push((prefix, i.to_string())),
        toml::Value::Float(f) => items.push((prefix, f.to_string())),
        toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
        _ => {} // Skip arrays and other complex types
    }
}

/// Validate a configuration value and convert it to its TOML type
fn validate_config_value(key: &str, value: &str) -> Result<toml::Value> {
    if is_secret(key) {
        anyhow::bail!(
            "API tokens are not stored; pass --api-token or set {ENV_PREFIX}ZENDESK__API_TOKEN"
        );
    }

    match key {
        "zendesk.subdomain" => {
            let valid = !value.is_empty()
                && value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-');
            if !valid {
                anyhow::bail!("subdomain may only contain letters, digits and '-'");
            }
        }
        "zendesk.email" => {
            if !value.contains('@') {
                anyhow::bail!("email must be an email address");
            }
        }
        "zendesk.environment" => {
            value
                .parse::<Environment>()
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(toml::Value::String(value.trim().to_lowercase()));
        }
        "zendesk.base_url" => {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                anyhow::bail!("base_url must start with http:// or https://");
            }
        }
        "network.timeout_seconds" => {
            let timeout: u64 = value
                .parse()
                .context("timeout_seconds must be a positive integer")?;
            if timeout == 0 {
                anyhow::bail!("timeout_seconds must be greater than 0");
            }
            let timeout = i64::try_from(timeout).context("timeout_seconds is too large")?;
            return Ok(toml::Value::Integer(timeout));
        }
        "output.default_format" => {
            let format: OutputFormat = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            return Ok(toml::Value::String(format.as_str().to_string()));
        }
        "output.color_enabled" => {
            let enabled: bool = value.parse().context("Value must be 'true' or 'false'")?;
            return Ok(toml::Value::Boolean(enabled));
        }
        _ => anyhow::bail!(
            "Unknown configuration key '{}'. Known keys: {}",
            key,
            KNOWN_KEYS.join(", ")
        ),
    }

    Ok(toml::Value::String(value.to_string()))
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
