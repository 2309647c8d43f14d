use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a config that keeps data inside `root` and logs to `log_file`.
pub fn write_config(root: &Path, log_file: &Path) -> PathBuf {
    let path = root.join("config.toml");
    let content = format!(
        "data_dir = {:?}\nlog_file = {:?}\n",
        root.join("data").display().to_string(),
        log_file.display().to_string(),
    );
    fs::write(&path, content).unwrap();
    path
}

#[allow(deprecated)]
fn cargo_bin() -> Command {
    Command::cargo_bin("mindmend").unwrap()
}

pub fn mindmend_cmd_logging_to(root: &Path, log_file: &Path) -> Command {
    let config = write_config(root, log_file);
    let mut cmd = cargo_bin();
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(config);
    cmd
}

pub fn mindmend_cmd(root: &Path) -> Command {
    mindmend_cmd_logging_to(root, &root.join("mindmend.log"))
}
