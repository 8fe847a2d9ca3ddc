//! Configuration manager tests
//!
//! Cover get/set/list against an isolated config file.

use tempfile::TempDir;
use zdorg_cli::config::ConfigManager;
use zdorg_cli::output::OutputFormat;
use zdorg_core::Environment;

// Test helper: Create a temporary config manager with isolated directory
fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    let config_path = temp_dir.path().join("config.toml");
    ConfigManager::with_path(config_path)
}

#[test]
fn test_config_manager_set_and_get_subdomain() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("zendesk.subdomain", "acme").unwrap();

    assert!(temp_dir.path().join("config.toml").exists());
    assert_eq!(config_manager.get("zendesk.subdomain").unwrap(), "acme");
}

#[test]
fn test_config_manager_environment_is_normalized() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager
        .set("zendesk.environment", "Production")
        .unwrap();

    assert_eq!(
        config_manager.get("zendesk.environment").unwrap(),
        "production"
    );
    assert_eq!(
        config_manager.load().unwrap().zendesk.environment,
        Environment::Production
    );
}

#[test]
fn test_config_manager_typed_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("network.timeout_seconds", "90").unwrap();
    config_manager.set("output.color_enabled", "false").unwrap();
    config_manager.set("output.default_format", "json").unwrap();

    let config = config_manager.load().unwrap();
    assert_eq!(config.network.timeout_seconds, 90);
    assert!(!config.output.color_enabled);
    assert_eq!(config.output.default_format, OutputFormat::Json);
}

#[test]
fn test_config_manager_preserves_existing_config_on_new_set() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("zendesk.subdomain", "acme").unwrap();
    config_manager
        .set("zendesk.email", "ops@acme.example")
        .unwrap();

    assert_eq!(config_manager.get("zendesk.subdomain").unwrap(), "acme");
    assert_eq!(
        config_manager.get("zendesk.email").unwrap(),
        "ops@acme.example"
    );
}

#[test]
fn test_config_manager_creates_config_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir
        .path()
        .join("nested")
        .join("zdorg")
        .join("config.toml");

    let mut config_manager = ConfigManager::with_path(config_path.clone());
    assert!(!config_path.parent().unwrap().exists());

    config_manager.set("zendesk.subdomain", "acme").unwrap();

    assert!(config_path.exists());
}

#[test]
fn test_config_manager_never_writes_api_token() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);
    config_manager.set("zendesk.subdomain", "acme").unwrap();

    assert!(config_manager.set("zendesk.api_token", "secret").is_err());
    assert!(config_manager.get("zendesk.api_token").is_err());

    let contents = std::fs::read_to_string(temp_dir.path().join("config.toml")).unwrap();
    assert!(!contents.contains("secret"));
}

#[test]
fn test_config_manager_list_shows_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);
    config_manager.set("zendesk.subdomain", "acme").unwrap();

    let items = config_manager.list().unwrap();

    let subdomain = items.iter().find(|(key, _)| key == "zendesk.subdomain");
    assert_eq!(subdomain.map(|(_, v)| v.as_str()), Some("acme"));
    assert!(items.iter().any(|(key, _)| key == "network.timeout_seconds"));
    assert!(!items.iter().any(|(key, _)| key == "zendesk.api_token"));
}

#[test]
fn test_config_manager_default_values_when_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);

    let config = config_manager.load().unwrap();

    assert_eq!(config.network.timeout_seconds, 30);
    assert_eq!(config.zendesk.environment, Environment::Sandbox);
    assert!(config.output.color_enabled);
}
