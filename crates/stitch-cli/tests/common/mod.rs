use std::path::Path;
use std::process::{Command, Output};

use url::Url;

/// Run the CLI with an isolated HOME and config directory.
///
/// Any STITCH_* variables of the calling environment are removed so the
/// test only sees what it passes in `envs`.
pub fn run_cli_with_env(args: &[&str], home: &Path, envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stitch"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    for var in ["STITCH_TOKEN", "STITCH_SERVICE", "STITCH_BASE", "STITCH_TABLE", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with an isolated HOME and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, envs: &[(&str, &str)]) -> String {
    let output = run_cli_with_env(args, home, envs);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Convert a directory into a file:// service URL.
pub fn file_service_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}
