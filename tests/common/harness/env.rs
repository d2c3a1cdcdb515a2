//! Isolated test environment with a temporary config directory.

use super::JoplinkCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with its own settings file.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Commands built from it always pass `--config` so the user's real
/// settings are never read or written.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the settings file (may not exist yet)
    config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment without a settings file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("joplink").join("config.toml");
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    /// Returns the path to the settings file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Writes a settings file pointing at `127.0.0.1:port`.
    pub fn configure(&self, port: u16, api_token: Option<&str>) {
        let mut content = format!("host = \"127.0.0.1\"\nport = {port}\n");
        if let Some(token) = api_token {
            content.push_str(&format!("api_token = \"{token}\"\n"));
        }
        self.write_config(&content);
    }

    /// Writes raw settings file content.
    pub fn write_config(&self, content: &str) {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create config dir");
        }
        std::fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// Reads the settings file back.
    pub fn read_config(&self) -> String {
        std::fs::read_to_string(&self.config_path).expect("Failed to read config")
    }

    /// Creates a JoplinkCommand configured for this test environment.
    pub fn cmd(&self) -> JoplinkCommand {
        JoplinkCommand::new().config(&self.config_path)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_starts_without_config() {
        let env = TestEnv::new();
        assert!(!env.config_path().exists());
        assert!(env.config_path().ends_with("joplink/config.toml"));
    }

    #[test]
    fn test_env_configure_writes_settings() {
        let env = TestEnv::new();
        env.configure(41190, Some("abc"));

        let content = env.read_config();
        assert!(content.contains("port = 41190"));
        assert!(content.contains("api_token = \"abc\""));
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.configure(41184, None);
            env.config_path().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.argv();
        assert_eq!(args[0], "--config");
        assert_eq!(args[1], env.config_path().to_string_lossy());
    }
}
