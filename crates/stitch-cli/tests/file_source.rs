//! CLI integration tests against snapshot directories.

mod common;

use tempfile::TempDir;

use common::{file_service_url, run_cli_with_env, run_cli_with_env_success};

const SNAPSHOT: &str = r#"{
  "records": [
    {"id": "rec1", "createdTime": "2024-01-01T00:00:00Z", "fields": {"内容": "hello"}},
    {"id": "rec2", "createdTime": "2024-02-01T09:30:00Z", "fields": {
      "标题": "Straight stitching",
      "视频": [{"url": "https://cdn.example.com/stitch.mp4"}],
      "封面图": [{"url": "https://cdn.example.com/stitch.jpg"}]
    }}
  ]
}"#;

fn write_snapshot(root: &std::path::Path, body: &str) {
    let dir = root.join("appXXXX");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Table 1.json"), body).unwrap();
}

#[test]
fn test_show_text_from_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = temp_dir.path().join("snapshots");
    write_snapshot(&snapshots, SNAPSHOT);
    let service = file_service_url(&snapshots);
    let home = temp_dir.path().join("home");

    let stdout = run_cli_with_env_success(
        &["show", "--service", &service, "--base", "appXXXX", "--table", "Table 1"],
        &home,
        &[],
    );

    assert!(stdout.contains("Untitled"));
    assert!(stdout.contains("hello"));
    assert!(stdout.contains("Published: 1/1/2024, 12:00:00 AM"));
    assert!(stdout.contains("Straight stitching"));
    assert!(stdout.contains("No content"));
    assert!(stdout.contains("Video: https://cdn.example.com/stitch.mp4"));
    assert!(stdout.contains("Poster: https://cdn.example.com/stitch.jpg"));
}

#[test]
fn test_show_json_from_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = temp_dir.path().join("snapshots");
    write_snapshot(&snapshots, SNAPSHOT);
    let service = file_service_url(&snapshots);
    let home = temp_dir.path().join("home");

    let stdout = run_cli_with_env_success(
        &["show", "--format", "json"],
        &home,
        &[
            ("STITCH_SERVICE", &service),
            ("STITCH_BASE", "appXXXX"),
            ("STITCH_TABLE", "Table 1"),
        ],
    );

    let page: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(page["state"], "items");
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["items"][0]["title"], "Untitled");
    assert!(page["items"][0].get("media").is_none());
    assert_eq!(page["items"][1]["media"]["poster"], "https://cdn.example.com/stitch.jpg");
}

#[test]
fn test_show_empty_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = temp_dir.path().join("snapshots");
    write_snapshot(&snapshots, r#"{"records": []}"#);
    let service = file_service_url(&snapshots);
    let home = temp_dir.path().join("home");

    let stdout = run_cli_with_env_success(
        &["show", "--service", &service, "--base", "appXXXX", "--table", "Table 1"],
        &home,
        &[],
    );

    assert!(stdout.contains("No data yet"));
    assert!(!stdout.contains("Published:"));
}

#[test]
fn test_show_missing_snapshot_fails() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = temp_dir.path().join("snapshots");
    std::fs::create_dir_all(&snapshots).unwrap();
    let service = file_service_url(&snapshots);
    let home = temp_dir.path().join("home");

    let output = run_cli_with_env(
        &["show", "--service", &service, "--base", "appXXXX", "--table", "Table 1"],
        &home,
        &[],
    );

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed to load:"));
    assert!(stdout.contains("no snapshot of table 'Table 1'"));
}

#[test]
fn test_configure_then_show() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = temp_dir.path().join("snapshots");
    write_snapshot(
        &snapshots,
        r#"{"records": [{"id": "rec1", "fields": {"Name": "Darts", "Notes": "Shaping a bodice"}}]}"#,
    );
    let service = file_service_url(&snapshots);
    let home = temp_dir.path().join("home");

    run_cli_with_env_success(
        &[
            "configure",
            "--service",
            &service,
            "--base",
            "appXXXX",
            "--table",
            "Table 1",
            "--title-field",
            "Name",
            "--body-field",
            "Notes",
        ],
        &home,
        &[],
    );

    let stdout = run_cli_with_env_success(&["show"], &home, &[]);
    assert!(stdout.contains("Darts"));
    assert!(stdout.contains("Shaping a bodice"));
    assert!(stdout.contains("Unknown date"));
}

#[test]
fn test_status_redacts_token() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");

    run_cli_with_env_success(
        &[
            "configure",
            "--base",
            "appXXXX",
            "--table",
            "Table 1",
            "--token",
            "patSECRETVALUE",
        ],
        &home,
        &[],
    );

    let stdout = run_cli_with_env_success(&["status"], &home, &[]);
    assert!(stdout.contains("https://api.airtable.com/v0/appXXXX/Table%201"));
    assert!(stdout.contains("set (stored)"));
    assert!(!stdout.contains("patSECRETVALUE"));

    let stdout = run_cli_with_env_success(&["status"], &home, &[("STITCH_TOKEN", "patENV")]);
    assert!(stdout.contains("set (from STITCH_TOKEN)"));
    assert!(!stdout.contains("patENV"));
}

#[cfg(unix)]
#[test]
fn test_config_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");

    run_cli_with_env_success(
        &["configure", "--base", "appXXXX", "--token", "patSECRETVALUE"],
        &home,
        &[],
    );

    let path = home.join("config").join("stitch").join("config.json");
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_show_without_base_fails() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");

    let output = run_cli_with_env(&["show", "--table", "Table 1"], &home, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No base ID"));
}
