//! Integration tests for the azmi binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

const USER_ID: &str = "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ManagedIdentity/userAssignedIdentities/app";

fn azmi(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_azmi"))
        .current_dir(dir)
        .env_remove("AZMI_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_schema_lists_allowed_types() {
    let dir = tempdir().unwrap();
    let output = azmi(dir.path(), &["schema", "--variant", "system-assigned", "--block-only"]);
    assert!(output.status.success());

    let schema = stdout_json(&output);
    assert_eq!(
        schema["attributes"]["type"]["validators"][0]["one_of"],
        json!(["SystemAssigned"])
    );
    assert!(schema["attributes"].get("identity_ids").is_none());
}

#[test]
fn test_expand_combined() {
    let dir = tempdir().unwrap();
    let file = write_json(
        &dir,
        "identity.json",
        &json!({ "identity": [{ "type": "SystemAssigned, UserAssigned", "identity_ids": [USER_ID] }] }),
    );

    let output = azmi(dir.path(), &["expand", &file]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_json(&output),
        json!({
            "kind": "SystemAssigned, UserAssigned",
            "principal_id": "",
            "tenant_id": "",
            "user_assigned_identity_ids": [USER_ID]
        })
    );
}

#[test]
fn test_expand_host_without_identity_is_none() {
    let dir = tempdir().unwrap();
    let file = write_json(
        &dir,
        "resource.json",
        &json!({ "name": "app", "location": "westeurope" }),
    );

    let output = azmi(dir.path(), &["expand", "--variant", "system-assigned", &file]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_json(&output)["kind"], json!("None"));
}

#[test]
fn test_validate_rejects_padded_identity_id() {
    let dir = tempdir().unwrap();
    let file = write_json(
        &dir,
        "identity.json",
        &json!([{ "type": "UserAssigned", "identity_ids": [format!(" {USER_ID}/")] }]),
    );

    let output = azmi(dir.path(), &["validate", "--variant", "user-assigned", &file]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_validate_failure_exit_code() {
    let dir = tempdir().unwrap();
    let file = write_json(
        &dir,
        "identity.json",
        &json!([{ "type": "SystemAssigned", "identity_ids": [USER_ID] }]),
    );

    let output = azmi(dir.path(), &["validate", &file]);
    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("identity_ids can only be specified when type includes UserAssigned"));
}

#[test]
fn test_expand_validation_error_exit_code() {
    let dir = tempdir().unwrap();
    let file = write_json(&dir, "identity.json", &json!([{ "type": "Delegated" }]));

    let output = azmi(dir.path(), &["expand", &file]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_missing_input_exit_code() {
    let dir = tempdir().unwrap();
    let output = azmi(dir.path(), &["expand", "does-not-exist.json"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_flatten_none_is_empty_list() {
    let dir = tempdir().unwrap();
    let file = write_json(&dir, "config.json", &json!({ "kind": "None" }));

    let output = azmi(dir.path(), &["flatten", &file]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn test_from_arm_resource_body() {
    let dir = tempdir().unwrap();
    let file = write_json(
        &dir,
        "resource.json",
        &json!({
            "location": "westeurope",
            "identity": {
                "type": "SystemAssigned",
                "principalId": "p",
                "tenantId": "t"
            }
        }),
    );

    let output = azmi(dir.path(), &["from-arm", "--variant", "system-assigned", &file]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_json(&output),
        json!([{ "type": "SystemAssigned", "principal_id": "p", "tenant_id": "t" }])
    );
}

#[test]
fn test_config_file_sets_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("azmi.toml"),
        "default_variant = \"user-assigned\"\noutput = \"yaml\"\n",
    )
    .unwrap();
    let file = write_json(
        &dir,
        "identity.json",
        &json!([{ "type": "UserAssigned", "identity_ids": [USER_ID] }]),
    );

    let output = azmi(dir.path(), &["to-arm", &file]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let body: Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(
        body,
        json!({ "type": "UserAssigned", "userAssignedIdentities": { USER_ID: {} } })
    );
}

#[test]
fn test_invalid_config_file_exit_code() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("azmi.toml"), "unknown = 1\n").unwrap();

    let output = azmi(dir.path(), &["schema"]);
    assert_eq!(output.status.code(), Some(2));
}
