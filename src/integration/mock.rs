//! integration::mock
//!
//! Mock integration for deterministic testing.
//!
//! # Design
//!
//! One `MockIntegration` implements every collaborator trait: runner
//! lookup, platform store, builder and external tool. Platforms are held
//! in memory (installs add to the set), calls are recorded in order, and
//! a single operation can be configured to fail.
//!
//! # Example
//!
//! ```
//! use caravel::integration::mock::{MockIntegration, MockOperation};
//! use caravel::integration::PlatformStore;
//! use std::path::Path;
//!
//! # tokio_test::block_on(async {
//! let mock = MockIntegration::new().with_platforms(["android"]);
//!
//! mock.install("ios", Path::new("/app")).await.unwrap();
//! let platforms = mock.platforms(Path::new("/app")).await.unwrap();
//!
//! assert!(platforms.contains("ios"));
//! assert_eq!(mock.operations().len(), 2);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::{
    BuildRequest, Builder, ExternalTool, IntegrationError, PlatformStore, Runner, RunnerProvider,
    ToolOptions,
};
use crate::core::project::Project;
use crate::engine::metadata::CommandOption;

/// Mock integration for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockIntegration {
    inner: Arc<Mutex<MockIntegrationInner>>,
}

#[derive(Debug, Default)]
struct MockIntegrationInner {
    /// Installed platforms.
    platforms: BTreeSet<String>,
    /// Options of the build runner; `None` means no runner.
    runner_options: Option<Vec<CommandOption>>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail build_runner with the given error.
    RunnerLookup(IntegrationError),
    /// Fail the runner's options query with the given error.
    RunnerOptions(IntegrationError),
    /// Fail platforms with the given error.
    Platforms(IntegrationError),
    /// Fail install with the given error.
    Install(IntegrationError),
    /// Fail build with the given error.
    Build(IntegrationError),
    /// Fail the external tool with the given error.
    Tool(IntegrationError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOperation {
    BuildRunner,
    RunnerOptions,
    Platforms {
        root: PathBuf,
    },
    Install {
        platform: String,
        root: PathBuf,
    },
    Build {
        root: PathBuf,
        request: BuildRequest,
    },
    RunTool {
        args: Vec<String>,
        cwd: PathBuf,
    },
}

impl MockIntegration {
    /// Create a mock with no platforms and no build runner.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockIntegrationInner::default())),
        }
    }

    /// Start with `platforms` installed.
    pub fn with_platforms<I, S>(self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.platforms = platforms.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Give the project a build runner contributing `options`.
    pub fn with_runner_options(self, options: Vec<CommandOption>) -> Self {
        self.set_runner_options(Some(options));
        self
    }

    /// Replace the build runner (`None` removes it).
    pub fn set_runner_options(&self, options: Option<Vec<CommandOption>>) {
        let mut inner = self.inner.lock().unwrap();
        inner.runner_options = options;
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Build requests received, in order.
    pub fn builds(&self) -> Vec<BuildRequest> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::Build { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Argument lists the external tool was run with, in order.
    pub fn tool_runs(&self) -> Vec<Vec<String>> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::RunTool { args, .. } => Some(args),
                _ => None,
            })
            .collect()
    }

    /// Platforms installed through the mock, in order.
    pub fn installs(&self) -> Vec<String> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::Install { platform, .. } => Some(platform),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<IntegrationError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::RunnerLookup(e)) if expected == "build_runner" => Some(e.clone()),
            Some(FailOn::RunnerOptions(e)) if expected == "runner_options" => Some(e.clone()),
            Some(FailOn::Platforms(e)) if expected == "platforms" => Some(e.clone()),
            Some(FailOn::Install(e)) if expected == "install" => Some(e.clone()),
            Some(FailOn::Build(e)) if expected == "build" => Some(e.clone()),
            Some(FailOn::Tool(e)) if expected == "tool" => Some(e.clone()),
            _ => None,
        }
    }
}

impl Default for MockIntegration {
    fn default() -> Self {
        Self::new()
    }
}

/// Runner handed out by [`MockIntegration`].
struct MockRunner {
    mock: MockIntegration,
    options: Vec<CommandOption>,
}

#[async_trait]
impl Runner for MockRunner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn options(&self) -> Result<Vec<CommandOption>, IntegrationError> {
        self.mock.record(MockOperation::RunnerOptions);
        if let Some(e) = self.mock.check_fail("runner_options") {
            return Err(e);
        }
        Ok(self.options.clone())
    }
}

#[async_trait]
impl RunnerProvider for MockIntegration {
    async fn build_runner(
        &self,
        _project: &Project,
    ) -> Result<Option<Box<dyn Runner>>, IntegrationError> {
        self.record(MockOperation::BuildRunner);
        if let Some(e) = self.check_fail("build_runner") {
            return Err(e);
        }

        let options = self.inner.lock().unwrap().runner_options.clone();
        Ok(options.map(|options| {
            Box::new(MockRunner {
                mock: self.clone(),
                options,
            }) as Box<dyn Runner>
        }))
    }
}

#[async_trait]
impl PlatformStore for MockIntegration {
    async fn platforms(&self, root: &Path) -> Result<BTreeSet<String>, IntegrationError> {
        self.record(MockOperation::Platforms {
            root: root.to_path_buf(),
        });
        if let Some(e) = self.check_fail("platforms") {
            return Err(e);
        }
        Ok(self.inner.lock().unwrap().platforms.clone())
    }

    async fn install(&self, platform: &str, root: &Path) -> Result<(), IntegrationError> {
        self.record(MockOperation::Install {
            platform: platform.to_string(),
            root: root.to_path_buf(),
        });
        if let Some(e) = self.check_fail("install") {
            return Err(e);
        }
        let mut inner = self.inner.lock().unwrap();
        inner.platforms.insert(platform.to_string());
        Ok(())
    }
}

#[async_trait]
impl Builder for MockIntegration {
    async fn build(&self, project: &Project, request: &BuildRequest) -> Result<(), IntegrationError> {
        self.record(MockOperation::Build {
            root: project.root().to_path_buf(),
            request: request.clone(),
        });
        if let Some(e) = self.check_fail("build") {
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl ExternalTool for MockIntegration {
    fn name(&self) -> &str {
        "cordova"
    }

    async fn run(&self, args: &[String], extra: &ToolOptions) -> Result<(), IntegrationError> {
        self.record(MockOperation::RunTool {
            args: args.to_vec(),
            cwd: extra.cwd.clone(),
        });
        if let Some(e) = self.check_fail("tool") {
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProjectConfig;
    use crate::engine::options::BuildOptions;

    fn project() -> Project {
        Project::new(
            "/app",
            ProjectConfig {
                name: "app".into(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn install_adds_platform() {
        let mock = MockIntegration::new();
        assert!(mock.platforms(Path::new("/app")).await.unwrap().is_empty());

        mock.install("ios", Path::new("/app")).await.unwrap();

        let platforms = mock.platforms(Path::new("/app")).await.unwrap();
        assert_eq!(platforms.into_iter().collect::<Vec<_>>(), vec!["ios"]);
        assert_eq!(mock.installs(), vec!["ios"]);
    }

    #[tokio::test]
    async fn runner_absent_by_default() {
        let mock = MockIntegration::new();
        assert!(mock.build_runner(&project()).await.unwrap().is_none());
        assert_eq!(mock.operations(), vec![MockOperation::BuildRunner]);
    }

    #[tokio::test]
    async fn runner_reports_options() {
        let mock = MockIntegration::new().with_runner_options(vec![CommandOption::boolean("prod", "")]);
        let runner = mock.build_runner(&project()).await.unwrap().unwrap();
        let options = runner.options().await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(
            mock.operations(),
            vec![MockOperation::BuildRunner, MockOperation::RunnerOptions]
        );
    }

    #[tokio::test]
    async fn fail_on_records_then_fails() {
        let mock = MockIntegration::new().fail_on(FailOn::Tool(IntegrationError::CommandFailed {
            command: "cordova prepare".into(),
            status: "exit status: 1".into(),
        }));
        let extra = ToolOptions {
            cwd: PathBuf::from("/app"),
        };

        let result = mock.run(&["prepare".to_string()], &extra).await;
        assert!(matches!(result, Err(IntegrationError::CommandFailed { .. })));
        assert_eq!(mock.tool_runs(), vec![vec!["prepare".to_string()]]);

        mock.clear_fail_on();
        assert!(mock.run(&[], &extra).await.is_ok());
    }

    #[tokio::test]
    async fn builds_are_recorded() {
        let mock = MockIntegration::new();
        let request = BuildRequest {
            inputs: vec!["ios".into()],
            options: BuildOptions {
                platform: Some("ios".into()),
                engine: "cordova".into(),
                ..Default::default()
            },
        };
        mock.build(&project(), &request).await.unwrap();
        assert_eq!(mock.builds(), vec![request]);
    }
}
