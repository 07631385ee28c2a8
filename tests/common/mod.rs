//! Common test utilities for auaust integration tests.
//!
//! Provides `TestEnv`: an isolated workspace (PROJECTS/, GLOBALS/, BUNDLES/)
//! in a temp directory, plus helpers to run the `auaust` binary against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use auaust::ProjectLayout;
use tempfile::TempDir;

pub const PROJECT: &str = "demo";

/// Result of running an auaust CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated workspace with its own config home
pub struct TestEnv {
    pub root: TempDir,
    pub config_home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("Failed to create workspace dir"),
            config_home: tempfile::tempdir().expect("Failed to create config dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::conventional(self.root.path(), PROJECT)
    }

    pub fn write(&self, relative: &str, content: &str) {
        write_file(&self.path(relative), content);
    }

    pub fn write_index(&self, content: &str) {
        write_file(&self.layout().index, content);
    }

    pub fn write_global(&self, name: &str, content: &str) {
        self.write(&format!("GLOBALS/{}.js", name), content);
    }

    pub fn write_local(&self, name: &str, content: &str) {
        self.write(&format!("PROJECTS/{}/IMPORTS/{}.js", PROJECT, name), content);
    }

    pub fn read_bundle(&self) -> Option<String> {
        std::fs::read_to_string(self.layout().bundle).ok()
    }

    /// Run auaust with `--root` pointing at this workspace
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_auaust"));
        cmd.current_dir(self.root.path())
            .args(args)
            .arg("--root")
            .arg(self.root.path())
            .arg("--color")
            .arg("never")
            .env("TERM", "dumb")
            .env("HOME", self.config_home.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("CURRENT_PROJECT")
            .env_remove("INDEX_FILE")
            .env_remove("AUAUST_COLOR");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute auaust");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// One global at the top, one local after the body
pub const EXAMPLE_INDEX: &str = "\
/* AUAUST
 * useGlobal utils
 * useLocal helpers @after
 */
const x=1;
";
