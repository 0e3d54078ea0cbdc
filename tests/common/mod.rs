use std::sync::Mutex;

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Operation date every scripted session runs on.
pub const TODAY: &str = "01/02/2024";

/// Creates an isolated application directory.
pub fn app_home() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// CLI in script mode, rooted at `home`, with a fixed operation date.
pub fn script_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("discount_core_cli").expect("binary built");
    cmd.env("DISCOUNT_CORE_CLI_SCRIPT", "1")
        .env("DISCOUNT_CORE_HOME", home)
        .env("DISCOUNT_CORE_TODAY", TODAY)
        .env_remove("RUST_LOG");
    cmd
}
