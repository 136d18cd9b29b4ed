//! End-to-end runs of the dashboard-contexts binary.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path();
    fs::create_dir_all(ws.join("config")).unwrap();
    fs::write(
        ws.join("config").join("config.toml"),
        format!(
            r#"
[charm]
endpoint-type = "publicURL"

[network]
private-address = "10.5.0.10"

[host]
root = "{}"
trust_store_refresh = []
"#,
            ws.join("root").display()
        ),
    )
    .unwrap();
    fs::write(
        ws.join("relations.toml"),
        r#"
local-unit = "openstack-dashboard/0"

[[relations.cluster]]
id = "cluster:1"

[[relations.cluster.units]]
name = "openstack-dashboard/1"
data = { private-address = "10.5.0.11" }
"#,
    )
    .unwrap();
    temp_dir
}

fn run(ws: &TempDir, args: &[&str]) -> std::process::Output {
    let home = ws.path().join("home");
    fs::create_dir_all(&home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_dashboard-contexts"))
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("DASHBOARD_LOG")
        .env_remove("DASHBOARD_ENV")
        .arg("--quiet")
        .arg("--workspace")
        .arg(ws.path())
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_render_haproxy_writes_flag_file() {
    let ws = workspace();
    let output = run(&ws, &["render", "haproxy"]);
    assert!(
        output.status.success(),
        "render should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["units"]["openstack-dashboard-0"], "10.5.0.10");
    assert_eq!(value["units"]["openstack-dashboard-1"], "10.5.0.11");
    assert_eq!(value["service_ports"]["dash_secure"], serde_json::json!([443, 433]));

    let flag = fs::read_to_string(ws.path().join("root/etc/default/haproxy")).unwrap();
    assert_eq!(flag, "ENABLED=1\n");
}

#[test]
fn test_render_all() {
    let ws = workspace();
    let output = run(&ws, &["render-all"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["identity_service"]["primary_endpoint"], "publicURL");
    assert_eq!(value["router_setting"]["disable_router"], true);
    assert!(value["websso"].as_object().unwrap().is_empty());
}

#[test]
fn test_unknown_context_exits_non_zero() {
    let ws = workspace();
    let output = run(&ws, &["render", "nova"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown context: nova"));
}
