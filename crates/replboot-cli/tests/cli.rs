//! Integration tests for the replboot binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn replboot() -> Command {
    Command::cargo_bin("replboot").unwrap()
}

/// A topology config with every path rooted under `root`.
fn write_config(root: &Path, node_type: &str, initialized: bool) -> std::path::PathBuf {
    let path = root.join("replication.toml");
    let content = format!(
        r#"
node_type = "{node_type}"
master_address = "192.0.2.10"
slave_addresses = ["192.0.2.11"]
pg_wal_dir = "{root}/pg_wal_archive"
pg_data_dir = "{root}/data"
service_home = "{root}/pgsql"
initialized = {initialized}

[[pg_hba]]
conn_type = "host"
database = "replication"
user = "replication"
address = "192.0.2.11/32"
method = "md5"
"#,
        root = root.display(),
    );
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn converge_invalid_role_fails_before_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "replica", false);

    replboot()
        .args(["converge", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("node_type must be set to either"));

    assert!(!dir.path().join("pgsql").exists());
    assert!(!dir.path().join("pg_wal_archive").exists());
}

#[test]
fn converge_runs_two_phases() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "slave", false);

    // First pass: credentials only; initialized flag persisted.
    replboot()
        .args(["converge", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("credentials-ready"));

    let persisted = fs::read_to_string(&config).unwrap();
    assert!(persisted.contains("initialized = true"));
    assert!(dir.path().join("pgsql/.ssh/id_ed25519").exists());
    assert!(!dir.path().join("data/standby.signal").exists());

    // Second pass: slave role applied.
    replboot()
        .args(["converge", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("role-applied"));

    assert!(dir.path().join("data/standby.signal").exists());
    let fragment = fs::read_to_string(dir.path().join("data/conf.d/replication.conf")).unwrap();
    assert!(fragment.contains("host=192.0.2.10"));
}

#[test]
fn status_reports_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "master", false);

    replboot()
        .args(["status", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("role:        master")
                .and(predicate::str::contains("next pass:   credential-setup"))
                .and(predicate::str::contains("private key: missing")),
        );

    assert!(!dir.path().join("pgsql").exists());
}

#[test]
fn init_config_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replication.toml");

    replboot()
        .args(["init-config", "--config"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    replboot()
        .args(["init-config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
}
