//! End-to-end tests for the `kiln` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn project(env_files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in env_files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "admin", "version": "2.8.0", "dependencies": { "vue": "^3.2.0" } }"#,
    )
    .unwrap();
    dir
}

fn kiln() -> Command {
    let mut cmd = Command::cargo_bin("kiln").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("KILN_ENV_DIR")
        .env_remove("KILN_INHERIT_PROCESS_ENV")
        .arg("--no-color");
    cmd
}

#[test]
fn resolve_serve_prints_bundler_json() {
    let dir = project(&[(
        ".env.development",
        "VITE_PORT=3100\nVITE_PUBLIC_PATH=/\nVITE_DROP_CONSOLE=false\n",
    )]);

    let output = kiln()
        .args(["resolve", "--command", "serve", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["server"]["port"], 3100);
    assert_eq!(value["server"]["https"], true);
    assert_eq!(value["server"]["host"], true);
    assert_eq!(value["esbuild"]["pure"], serde_json::json!([]));
    assert_eq!(value["build"]["outDir"], "dist");
}

#[test]
fn resolve_build_defaults_to_production_mode() {
    let dir = project(&[(
        ".env.production",
        "VITE_DROP_CONSOLE=true\nVITE_PUBLIC_PATH=/admin/\n",
    )]);

    let output = kiln()
        .args(["resolve", "--command", "build", "--compact", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["base"], "/admin/");
    assert_eq!(value["esbuild"]["pure"], serde_json::json!(["console.log", "debugger"]));
    assert!(value.get("server").is_none());
}

#[test]
fn resolve_serve_without_port_fails() {
    let dir = project(&[(".env.development", "VITE_PUBLIC_PATH=/\n")]);

    kiln()
        .args(["resolve", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("VITE_PORT"));
}

#[test]
fn resolve_unknown_mode_fails() {
    let dir = project(&[(".env.development", "VITE_PORT=3100\n")]);

    kiln()
        .args(["resolve", "--mode", "staging", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn flags_prints_typed_values() {
    let dir = project(&[(
        ".env.development",
        "VITE_PORT=3100\nVITE_USE_MOCK=1\nVITE_GLOB_API_URL=/basic-api\n",
    )]);

    let output = kiln()
        .args(["flags", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["values"]["VITE_PORT"], 3100);
    assert_eq!(value["values"]["VITE_USE_MOCK"], false);
    assert_eq!(value["extra"]["VITE_GLOB_API_URL"], "/basic-api");
}

#[test]
fn alias_rewrites_specifier() {
    let dir = project(&[]);

    kiln()
        .args(["alias", "vue-i18n", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("vue-i18n/dist/vue-i18n.cjs.js\n"));
}

#[test]
fn alias_without_match_fails() {
    let dir = project(&[]);

    kiln()
        .args(["alias", "lodash-es", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no alias rule matches"));
}

#[test]
fn settings_file_moves_env_dir() {
    let dir = project(&[]);
    fs::create_dir(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/.env.development"), "VITE_PORT=4200\n").unwrap();
    fs::write(dir.path().join("kiln.toml"), "env_dir = \"env\"\n").unwrap();

    let output = kiln()
        .args(["resolve", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["server"]["port"], 4200);
}

#[test]
fn kiln_env_vars_override_settings_file() {
    let dir = project(&[]);
    fs::create_dir(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/.env.development"), "VITE_PORT=4300\n").unwrap();
    fs::write(dir.path().join("kiln.toml"), "env_dir = \"missing\"\n").unwrap();

    let output = kiln()
        .env("KILN_ENV_DIR", "env")
        .args(["resolve", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["server"]["port"], 4300);
}

#[test]
fn process_env_ignored_unless_inherited() {
    let dir = project(&[(".env.development", "VITE_PORT=3100\n")]);

    let output = kiln()
        .env("VITE_PORT", "4200")
        .args(["flags", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["values"]["VITE_PORT"], 3100);
}

#[test]
fn inherited_process_env_overrides_files_with_prefix_filter() {
    let dir = project(&[(".env.development", "VITE_PORT=3100\n")]);
    fs::write(dir.path().join("kiln.toml"), "inherit_process_env = true\n").unwrap();

    let output = kiln()
        .env("VITE_PORT", "4200")
        .env("VITE_GLOB_API_URL", "/from-shell")
        .env("APP_SECRET", "hunter2")
        .args(["flags", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["values"]["VITE_PORT"], 4200);
    assert_eq!(value["extra"]["VITE_GLOB_API_URL"], "/from-shell");
    assert!(value["extra"].get("APP_SECRET").is_none());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("hunter2"));
}

#[test]
fn inherit_process_env_can_come_from_kiln_env() {
    let dir = project(&[(".env.development", "VITE_PORT=3100\n")]);

    let output = kiln()
        .env("KILN_INHERIT_PROCESS_ENV", "true")
        .env("VITE_PORT", "4400")
        .args(["flags", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["values"]["VITE_PORT"], 4400);
}
