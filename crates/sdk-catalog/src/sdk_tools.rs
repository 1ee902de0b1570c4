//! SDK command-line tool driver
//!
//! Locates `sdkmanager` and `avdmanager` under an SDK root and runs
//! them, feeding their output to the catalog parsers. Tool discovery
//! walks the known layouts: cmdline-tools/latest, versioned
//! cmdline-tools installs, then the legacy tools/bin directory.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::packages::{parse_package_list, Catalog};
use crate::targets::{parse_target_list, TargetParse};

#[derive(Error, Debug)]
pub enum SdkToolError {
    #[error("SDK root does not exist: {0}")]
    SdkNotFound(PathBuf),
    #[error("sdkmanager not found under SDK root")]
    SdkManagerNotFound,
    #[error("avdmanager not found under SDK root")]
    AvdManagerNotFound,
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Tool produced no output")]
    EmptyOutput,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(windows)]
fn tool_file_name(tool: &str) -> String {
    format!("{}.bat", tool)
}

#[cfg(not(windows))]
fn tool_file_name(tool: &str) -> String {
    tool.to_string()
}

/// Find a command-line tool under the SDK root, newest layout first.
fn find_tool(sdk_root: &Path, tool: &str) -> Option<PathBuf> {
    let file_name = tool_file_name(tool);

    let latest = sdk_root
        .join("cmdline-tools")
        .join("latest")
        .join("bin")
        .join(&file_name);
    if latest.exists() {
        return Some(latest);
    }

    // Versioned installs (cmdline-tools/11.0/bin) when "latest" is absent.
    let cmdline_tools = sdk_root.join("cmdline-tools");
    if let Ok(entries) = std::fs::read_dir(&cmdline_tools) {
        let mut versioned: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path().join("bin").join(&file_name))
            .filter(|p| p.exists())
            .collect();
        versioned.sort();
        if let Some(path) = versioned.pop() {
            return Some(path);
        }
    }

    let legacy = sdk_root.join("tools").join("bin").join(&file_name);
    if legacy.exists() {
        return Some(legacy);
    }

    None
}

/// Handle on a located SDK installation.
pub struct SdkTools {
    sdk_root: PathBuf,
    sdkmanager_path: PathBuf,
    java_home: Option<PathBuf>,
}

impl SdkTools {
    /// Validate the SDK root and locate `sdkmanager`.
    pub fn new(sdk_root: impl Into<PathBuf>) -> Result<Self, SdkToolError> {
        let sdk_root = sdk_root.into();
        if !sdk_root.exists() {
            return Err(SdkToolError::SdkNotFound(sdk_root));
        }

        let sdkmanager_path =
            find_tool(&sdk_root, "sdkmanager").ok_or(SdkToolError::SdkManagerNotFound)?;
        debug!("Found sdkmanager at {}", sdkmanager_path.display());

        Ok(Self {
            sdk_root,
            sdkmanager_path,
            java_home: None,
        })
    }

    pub fn sdk_root(&self) -> &Path {
        &self.sdk_root
    }

    /// Use a specific JDK for tool invocations instead of the ambient one.
    pub fn set_java_home(&mut self, java_home: impl Into<PathBuf>) {
        self.java_home = Some(java_home.into());
    }

    fn command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.env("ANDROID_SDK_ROOT", &self.sdk_root)
            .env("ANDROID_HOME", &self.sdk_root);
        if let Some(java_home) = &self.java_home {
            cmd.env("JAVA_HOME", java_home);
        }
        cmd
    }

    async fn run_capturing(&self, program: &Path, args: &[&str]) -> Result<String, SdkToolError> {
        debug!("Running {} {:?}", program.display(), args);
        let output = self.command(program).args(args).output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SdkToolError::CommandFailed(format!(
                "{} exited with {}: {}",
                program.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run `sdkmanager --list` and parse the result.
    pub async fn list_packages(&self) -> Result<Catalog, SdkToolError> {
        let stdout = self
            .run_capturing(&self.sdkmanager_path, &["--list"])
            .await?;
        if stdout.trim().is_empty() {
            return Err(SdkToolError::EmptyOutput);
        }

        let catalog = parse_package_list(&stdout);
        if catalog.dropped > 0 {
            warn!("Dropped {} unparseable package rows", catalog.dropped);
        }
        info!(
            "Found {} installed, {} available, {} updatable packages",
            catalog.installed.len(),
            catalog.available.len(),
            catalog.updates.len()
        );
        Ok(catalog)
    }

    /// Run `avdmanager list target` and parse the result.
    pub async fn list_targets(&self) -> Result<TargetParse, SdkToolError> {
        let avdmanager =
            find_tool(&self.sdk_root, "avdmanager").ok_or(SdkToolError::AvdManagerNotFound)?;
        let stdout = self.run_capturing(&avdmanager, &["list", "target"]).await?;
        if stdout.trim().is_empty() {
            return Err(SdkToolError::EmptyOutput);
        }

        let parsed = parse_target_list(&stdout);
        if parsed.skipped > 0 {
            warn!("Skipped {} incomplete target blocks", parsed.skipped);
        }
        info!("Found {} SDK targets", parsed.targets.len());
        Ok(parsed)
    }

    /// Install packages, answering license prompts with "y".
    pub async fn install(&self, packages: &[String]) -> Result<(), SdkToolError> {
        if packages.is_empty() {
            return Ok(());
        }
        info!("Installing {} package(s): {:?}", packages.len(), packages);

        let mut child = self
            .command(&self.sdkmanager_path)
            .args(packages)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // License prompts appear one per package at most.
            for _ in 0..10 {
                if stdin.write_all(b"y\n").await.is_err() {
                    break;
                }
            }
            drop(stdin);
        }

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                debug!("sdkmanager: {}", line);
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(SdkToolError::CommandFailed(format!(
                "sdkmanager install exited with {}",
                status
            )));
        }
        info!("Package installation complete");
        Ok(())
    }

    /// Accept all pending SDK licenses.
    pub async fn accept_licenses(&self) -> Result<(), SdkToolError> {
        let mut child = self
            .command(&self.sdkmanager_path)
            .arg("--licenses")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            for _ in 0..30 {
                if stdin.write_all(b"y\n").await.is_err() {
                    break;
                }
            }
            drop(stdin);
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(SdkToolError::CommandFailed(format!(
                "sdkmanager --licenses exited with {}",
                status
            )));
        }
        info!("SDK licenses accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sdk_root() {
        let err = SdkTools::new("/definitely/not/a/real/sdk").unwrap_err();
        assert!(matches!(err, SdkToolError::SdkNotFound(_)));
    }

    #[tokio::test]
    async fn test_find_tool_prefers_latest_layout() {
        let dir = std::env::temp_dir().join(format!("avdforge-sdk-test-{}", std::process::id()));
        let latest_bin = dir.join("cmdline-tools").join("latest").join("bin");
        let legacy_bin = dir.join("tools").join("bin");
        tokio::fs::create_dir_all(&latest_bin).await.unwrap();
        tokio::fs::create_dir_all(&legacy_bin).await.unwrap();

        let name = tool_file_name("sdkmanager");
        tokio::fs::write(latest_bin.join(&name), "").await.unwrap();
        tokio::fs::write(legacy_bin.join(&name), "").await.unwrap();

        let found = find_tool(&dir, "sdkmanager").unwrap();
        assert!(found.starts_with(dir.join("cmdline-tools").join("latest")));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_tool_falls_back_to_legacy() {
        let dir = std::env::temp_dir().join(format!("avdforge-legacy-test-{}", std::process::id()));
        let legacy_bin = dir.join("tools").join("bin");
        tokio::fs::create_dir_all(&legacy_bin).await.unwrap();

        let name = tool_file_name("sdkmanager");
        tokio::fs::write(legacy_bin.join(&name), "").await.unwrap();

        let found = find_tool(&dir, "sdkmanager").unwrap();
        assert_eq!(found, legacy_bin.join(&name));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn test_find_tool_missing() {
        assert!(find_tool(Path::new("/definitely/not/real"), "sdkmanager").is_none());
    }
}
