//! integration::cordova
//!
//! Cordova-backed platform store and external tool.
//!
//! Installed platforms are the subdirectories of `<root>/platforms`.
//! Installing a platform and delegating commands both shell out to the
//! `cordova` executable (configurable via `cordova_bin`) with the
//! integration root as working directory. Child stdio is inherited so
//! the tool's own output reaches the user.

use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use super::traits::{ExternalTool, IntegrationError, PlatformStore, ToolOptions};

/// Directory under the integration root holding installed platforms.
pub const PLATFORMS_DIR: &str = "platforms";

/// Platform discovery and installation via Cordova.
#[derive(Debug, Clone)]
pub struct CordovaPlatforms {
    bin: String,
}

impl CordovaPlatforms {
    /// Create a store that installs with `bin`.
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl PlatformStore for CordovaPlatforms {
    async fn platforms(&self, root: &Path) -> Result<BTreeSet<String>, IntegrationError> {
        let is_dir = tokio::fs::metadata(root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(IntegrationError::InvalidRoot(root.to_path_buf()));
        }

        let dir = root.join(PLATFORMS_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(IntegrationError::Io(format!("{}: {}", dir.display(), e))),
        };

        let mut platforms = BTreeSet::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| IntegrationError::Io(e.to_string()))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| IntegrationError::Io(e.to_string()))?;
            if file_type.is_dir() {
                platforms.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }

        tracing::debug!(root = %root.display(), ?platforms, "discovered platforms");
        Ok(platforms)
    }

    async fn install(&self, platform: &str, root: &Path) -> Result<(), IntegrationError> {
        let args = vec![
            "platform".to_string(),
            "add".to_string(),
            platform.to_string(),
        ];
        run_process(&self.bin, &args, root).await
    }
}

/// The Cordova CLI as the external tool.
#[derive(Debug, Clone)]
pub struct CordovaTool {
    bin: String,
}

impl CordovaTool {
    /// Create a tool that runs `bin`.
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl ExternalTool for CordovaTool {
    fn name(&self) -> &str {
        "cordova"
    }

    async fn run(&self, args: &[String], extra: &ToolOptions) -> Result<(), IntegrationError> {
        run_process(&self.bin, args, &extra.cwd).await
    }
}

/// Run `program args...` in `cwd` and wait for it to exit successfully.
///
/// # Errors
///
/// - [`IntegrationError::SpawnFailed`] if the program cannot be started
/// - [`IntegrationError::CommandFailed`] if it exits non-zero
pub async fn run_process(program: &str, args: &[String], cwd: &Path) -> Result<(), IntegrationError> {
    let rendered = render_command(program, args);
    tracing::info!(cwd = %cwd.display(), "running {}", rendered);

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .await
        .map_err(|e| IntegrationError::SpawnFailed {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    if !status.success() {
        return Err(IntegrationError::CommandFailed {
            command: rendered,
            status: status.to_string(),
        });
    }
    Ok(())
}

fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
