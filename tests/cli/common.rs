#![allow(dead_code)]
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Port nothing listens on; connections are refused immediately.
pub const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

/// Helper struct for managing test resources
pub struct TestContext {
    /// Working directory for the command, so no stray config file is picked up
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(TestContext {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn temp_path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf, std::io::Error> {
        let file_path = self.temp_path().join(name);
        fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// The command, run from the context's directory
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cmd();
        cmd.current_dir(self.temp_path())
            .env_remove("CONTRACT_SESSION_RPC_URL")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new().expect("Failed to create test context")
    }
}

/// Get the contract-session command
#[allow(deprecated)]
pub fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("contract-session")
        .expect("Failed to find contract-session binary")
}

pub fn fixture_artifact() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("ALendMigrator.json")
}
