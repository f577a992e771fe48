//! Integration tests for the caravel binary.
//!
//! These tests run the compiled CLI against temporary project directories,
//! with the global config isolated to the test's home directory.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// An isolated home directory plus a project directory.
struct TestEnv {
    home: TempDir,
    project: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            home: TempDir::new().expect("failed to create home dir"),
            project: TempDir::new().expect("failed to create project dir"),
        }
    }

    /// Write a Cordova project with the given extra `caravel.toml` content.
    fn with_project(self, extra: &str) -> Self {
        let config = format!("name = \"field-notes\"\n\n[integrations.cordova]\n{}", extra);
        fs::write(self.project.path().join("caravel.toml"), config).unwrap();
        fs::write(self.project.path().join("config.xml"), "<widget/>").unwrap();
        self
    }

    fn with_global_config(self, content: &str) -> Self {
        fs::write(self.home.path().join("config.toml"), content).unwrap();
        self
    }

    fn project_path(&self) -> &Path {
        self.project.path()
    }

    /// A caravel command isolated from the user's environment.
    fn caravel(&self) -> Command {
        let mut cmd = Command::cargo_bin("caravel").unwrap();
        cmd.env("HOME", self.home.path())
            .env("CARAVEL_CONFIG", self.home.path().join("config.toml"))
            .env_remove("XDG_CONFIG_HOME")
            .env("NO_COLOR", "1")
            .arg("--cwd")
            .arg(self.project.path());
        cmd
    }
}

// =============================================================================
// Global behavior
// =============================================================================

#[test]
fn version_flag_works() {
    TestEnv::new()
        .caravel()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("caravel"));
}

#[test]
fn completion_generates_bash_script() {
    TestEnv::new()
        .caravel()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caravel"));
}

// =============================================================================
// describe
// =============================================================================

#[test]
fn describe_prepare_json_includes_runner_options() {
    let env = TestEnv::new().with_project(
        "\n[build]\ncommand = [\"npm\", \"run\", \"build\", \"--\"]\n\n\
         [[build.options]]\nname = \"prod\"\ntype = \"boolean\"\n",
    );

    let output = env
        .caravel()
        .args(["describe", "prepare", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "prepare");
    assert_eq!(json["type"], "project");
    let names: Vec<&str> = json["options"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|o| o["name"].as_str())
        .collect();
    assert_eq!(names, vec!["build", "verbose", "nosave", "prod"]);
}

#[test]
fn describe_unknown_command_fails() {
    TestEnv::new()
        .caravel()
        .args(["describe", "serve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command 'serve'"));
}

// =============================================================================
// prepare
// =============================================================================

#[test]
fn prepare_outside_project_fails_with_hint() {
    TestEnv::new()
        .caravel()
        .arg("prepare")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("outside a project directory"))
        .stderr(predicate::str::contains("caravel.toml"));
}

#[test]
fn prepare_rejects_unknown_option() {
    TestEnv::new()
        .with_project("")
        .caravel()
        .args(["prepare", "--bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn prepare_without_platforms_warns_and_succeeds() {
    TestEnv::new()
        .with_project("")
        .caravel()
        .arg("prepare")
        .assert()
        .success()
        .stderr(predicate::str::contains("No platforms installed."));
}

#[test]
fn prepare_uninstalled_platform_declines_when_not_interactive() {
    TestEnv::new()
        .with_project("")
        .caravel()
        .args(["--no-interactive", "prepare", "ios"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Can't prepare for ios unless the platform is installed.",
        ))
        .stderr(predicate::str::contains("Did you mean just caravel prepare?"));
}

#[cfg(unix)]
mod delegation {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Install a fake `cordova` that records its arguments.
    fn fake_cordova(env: &TestEnv) -> String {
        let path = env.home.path().join("cordova");
        fs::write(&path, "#!/bin/sh\necho \"$@\" > cordova.log\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    fn setup() -> TestEnv {
        let env = TestEnv::new().with_project(
            "\n[build]\ncommand = [\"sh\", \"-c\", \"echo \\\"$@\\\" > build.log\", \"build\"]\n\n\
             [[build.options]]\nname = \"prod\"\ntype = \"boolean\"\n",
        );
        fs::create_dir_all(env.project_path().join("platforms/android")).unwrap();
        let bin = fake_cordova(&env);
        env.with_global_config(&format!("cordova_bin = \"{}\"\n", bin))
    }

    fn read(env: &TestEnv, file: &str) -> String {
        fs::read_to_string(env.project_path().join(file))
            .unwrap()
            .trim()
            .to_string()
    }

    #[test]
    fn prepare_builds_then_delegates() {
        let env = setup();

        env.caravel()
            .args(["prepare", "android", "--prod", "--verbose"])
            .assert()
            .success();

        assert_eq!(
            read(&env, "build.log"),
            "--prod --platform android --engine cordova"
        );
        assert_eq!(read(&env, "cordova.log"), "prepare android --verbose");
    }

    #[test]
    fn prepare_no_build_only_delegates() {
        let env = setup();

        env.caravel()
            .args(["prepare", "--no-build"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Cannot perform a build").not());

        assert!(!env.project_path().join("build.log").exists());
        assert_eq!(read(&env, "cordova.log"), "prepare");
    }

    #[test]
    fn prepare_confirm_installs_missing_platform() {
        let env = setup();

        env.caravel()
            .args(["--confirm", "prepare", "ios"])
            .assert()
            .success();

        // The fake records only its last invocation: the delegated prepare.
        assert_eq!(read(&env, "cordova.log"), "prepare ios");
        assert_eq!(
            read(&env, "build.log"),
            "--platform ios --engine cordova"
        );
    }

    #[test]
    fn prepare_accepts_global_flags_after_platform() {
        let env = setup();

        env.caravel()
            .args(["prepare", "ios", "--confirm"])
            .assert()
            .success();

        assert_eq!(read(&env, "cordova.log"), "prepare ios");
    }

    #[test]
    fn prepare_accepts_debug_after_options() {
        let env = setup();

        env.caravel()
            .args(["prepare", "--no-build", "--debug"])
            .assert()
            .success()
            .stderr(predicate::str::contains("unknown option").not());

        assert_eq!(read(&env, "cordova.log"), "prepare");
    }
}
