use std::{
    ffi::OsStr,
    path::PathBuf,
    process::{Command, Output, Stdio},
};
use tempfile::TempDir;

pub const TEST_OWNER: &str = "test-user";
pub const TEST_TOKEN: &str = "test-token";

/// Runs the `mbu` binary against a local endpoint with an isolated config file.
pub struct TestCli {
    cli_path: PathBuf,
    endpoint: String,
    config_dir: TempDir,
}

impl TestCli {
    pub fn new(endpoint: impl Into<String>) -> Self {
        TestCli {
            cli_path: PathBuf::from(env!("CARGO_BIN_EXE_mbu")),
            endpoint: endpoint.into(),
            config_dir: tempfile::tempdir().expect("Could not create config directory"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("contexts.json")
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.cli_path);

        command
            .arg("--config-file")
            .arg(self.config_path())
            .arg("--endpoint")
            .arg(&self.endpoint)
            .arg("--owner")
            .arg(TEST_OWNER)
            .arg("--token")
            .arg(TEST_TOKEN)
            .env_remove("RUST_LOG");

        command
    }

    pub fn run(&self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> String {
        let output = self.output(self.command().args(args));

        if !output.status.success() {
            panic!(
                "failed to run command:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        String::from_utf8(output.stdout).unwrap()
    }

    pub fn run_and_error(&self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> String {
        let output = self.output(self.command().args(args));

        if output.status.success() {
            panic!(
                "succeeded running command (expected failure):\n{}",
                String::from_utf8_lossy(&output.stdout)
            );
        }

        String::from_utf8(output.stderr).unwrap()
    }

    /// Like `run_and_error`, but stdin stays open until the process exits, so a command
    /// that reads stdin before failing never returns.
    pub fn run_and_error_with_open_stdin(
        &self,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> String {
        let mut process = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let stdin = process.stdin.take();
        let output = process.wait_with_output().unwrap();
        drop(stdin);

        if output.status.success() {
            panic!(
                "succeeded running command (expected failure):\n{}",
                String::from_utf8_lossy(&output.stdout)
            );
        }

        String::from_utf8(output.stderr).unwrap()
    }

    fn output(&self, command: &mut Command) -> Output {
        command.output().unwrap()
    }
}
