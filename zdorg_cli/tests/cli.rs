use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command with configuration isolated to `config_home`
fn zdorg(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("zdorg").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("ZDORG_ZENDESK__SUBDOMAIN")
        .env_remove("ZDORG_ZENDESK__API_TOKEN")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_fields_lists_catalog() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("shared_tickets"))
        .stdout(predicate::str::contains("organization_fields.region"));
}

#[test]
fn test_ids_reads_csv() {
    let home = TempDir::new().unwrap();
    let csv = home.path().join("orgs.csv");
    fs::write(&csv, "Name,Org_ID\nAcme,101\nGlobex,\nInitech,303\n").unwrap();

    zdorg(&home)
        .arg("ids")
        .arg(&csv)
        .assert()
        .success()
        .stdout("101\n303\n")
        .stderr(predicate::str::contains("Found 2 organization IDs"));
}

#[test]
fn test_ids_without_id_column_is_file_error() {
    let home = TempDir::new().unwrap();
    let csv = home.path().join("orgs.csv");
    fs::write(&csv, "name\nAcme\n").unwrap();

    zdorg(&home)
        .arg("ids")
        .arg(&csv)
        .assert()
        .code(4)
        .stderr(predicate::str::contains(
            "CSV file must contain an 'organization_id' column",
        ));
}

#[test]
fn test_update_without_subdomain_is_usage_error() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .args(["update", "--org-id", "1", "--field", "name=Acme"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("subdomain"));
}

#[test]
fn test_update_rejects_malformed_field() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .args(["update", "--org-id", "1", "--field", "name"])
        .args(["--subdomain", "acme", "--api-token", "t"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_update_rejects_nested_field_path() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .args(["update", "--org-id", "1", "--field", "organization_fields.a.b=x"])
        .args(["--subdomain", "acme", "--api-token", "t"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("organization_fields.<key>"));
}

#[test]
fn test_update_requires_a_target() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .args(["update", "--field", "name=Acme"])
        .assert()
        .failure();
}

#[test]
fn test_update_production_needs_confirmation() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .args(["update", "--org-id", "1", "--field", "name=Acme"])
        .args(["--subdomain", "acme", "--api-token", "t"])
        .args(["--environment", "production"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .args(["config", "set", "zendesk.subdomain", "acme"])
        .assert()
        .success();

    zdorg(&home)
        .args(["config", "get", "zendesk.subdomain"])
        .assert()
        .success()
        .stdout("acme\n");
}

#[test]
fn test_config_refuses_api_token() {
    let home = TempDir::new().unwrap();
    zdorg(&home)
        .args(["config", "set", "zendesk.api_token", "secret"])
        .assert()
        .code(2);
}
