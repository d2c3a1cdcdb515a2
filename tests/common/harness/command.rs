//! Builder for `joplink` invocations.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// One `joplink` invocation under construction.
///
/// Global options (`--config`, `--port`, `-v`) are kept apart from the
/// subcommand so they can be set in any order and still land first.
#[derive(Debug, Default)]
pub struct JoplinkCommand {
    globals: Vec<String>,
    args: Vec<String>,
}

impl JoplinkCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and writes settings at `path` instead of the user's file.
    pub fn config(mut self, path: &Path) -> Self {
        self.globals.push("--config".to_string());
        self.globals.push(path.to_string_lossy().into_owned());
        self
    }

    /// Pins the application port, skipping the scan.
    pub fn port(mut self, port: u16) -> Self {
        self.globals.push("--port".to_string());
        self.globals.push(port.to_string());
        self
    }

    /// Raises log verbosity: 1 is info, 2 debug, 3 trace.
    pub fn verbose(mut self, level: usize) -> Self {
        if level > 0 {
            self.globals.push(format!("-{}", "v".repeat(level)));
        }
        self
    }

    /// Appends subcommand arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// The full argument vector, globals first.
    pub fn argv(&self) -> Vec<String> {
        self.globals.iter().chain(&self.args).cloned().collect()
    }

    /// Runs the binary with `RUST_LOG` cleared so only `-v` sets the level.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("joplink").expect("Failed to find joplink binary");
        cmd.args(self.argv());
        cmd.env_remove("RUST_LOG");
        cmd.assert()
    }

    /// Runs, expects success and returns stdout.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("stdout was not valid UTF-8")
    }

    /// Runs, expects success and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("stdout was not JSON")
    }

    /// Runs and returns stderr whatever the exit status.
    pub fn stderr(self) -> String {
        let output = self.assert().get_output().stderr.clone();
        String::from_utf8(output).expect("stderr was not valid UTF-8")
    }

    // ===========================================
    // Subcommands
    // ===========================================

    /// `list <what> [IDS...]`
    pub fn list(self, what: &str) -> Self {
        self.args(["list", what])
    }

    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    pub fn show(self, note_id: &str) -> Self {
        self.args(["show", note_id])
    }

    // ===========================================
    // Listing options
    // ===========================================

    /// `--fields <list>`
    pub fn fields(self, list: &str) -> Self {
        self.args(["--fields", list])
    }

    /// `--format json`
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_come_before_subcommand() {
        let cmd = JoplinkCommand::new()
            .list("tags")
            .port(41190)
            .verbose(2)
            .fields("id,title");

        assert_eq!(
            cmd.argv(),
            ["--port", "41190", "-vv", "list", "tags", "--fields", "id,title"]
        );
    }

    #[test]
    fn config_path_is_passed_through() {
        let path = Path::new("/tmp/joplink/config.toml");
        let cmd = JoplinkCommand::new().config(path).show("n1");
        assert_eq!(
            cmd.argv(),
            ["--config", "/tmp/joplink/config.toml", "show", "n1"]
        );
    }

    #[test]
    fn zero_verbosity_adds_nothing() {
        let cmd = JoplinkCommand::new().verbose(0).search("milk").format_json();
        assert_eq!(cmd.argv(), ["search", "milk", "--format", "json"]);
    }

    #[test]
    fn help_runs_without_settings() {
        JoplinkCommand::new().args(["--help"]).assert().success();
    }
}
