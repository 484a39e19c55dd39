//! Test driver for optecho integration tests.
//!
//! Builds the `optecho` binary once, runs it with a given argument list
//! and captures stdout, stderr and the exit status.

use std::process::Command;
use std::sync::Once;

static BUILD_INIT: Once = Once::new();

fn target_dir() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/../target/debug")
}

/// Path of the optecho binary under the workspace target directory.
pub fn optecho_binary() -> String {
    format!("{}/optecho", target_dir())
}

/// Build optecho if not already done in this test process.
pub fn ensure_binary() {
    BUILD_INIT.call_once(|| {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let workspace_root = format!("{manifest_dir}/..");
        let status = Command::new("cargo")
            .args(["build", "-p", "optecho"])
            .current_dir(&workspace_root)
            .status()
            .expect("failed to run cargo build");
        assert!(status.success(), "cargo build -p optecho failed");
    });
}

/// A finished optecho run.
#[derive(Debug)]
pub struct Run {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if killed by a signal.
    pub code: Option<i32>,
}

impl Run {
    /// Run optecho with `args` (program name not included).
    pub fn new(args: &[&str]) -> std::io::Result<Run> {
        Self::new_in(args, None)
    }

    /// Like `new`, but with an optional working directory.
    pub fn new_in(args: &[&str], cwd: Option<&str>) -> std::io::Result<Run> {
        ensure_binary();
        let mut cmd = Command::new(optecho_binary());
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let output = cmd.output()?;
        Ok(Run {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }

    /// Lines of stdout starting with `match `, prefix stripped.
    pub fn matches(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter_map(|l| l.strip_prefix("match "))
            .collect()
    }

    /// Tokens of the `remainder:` line.
    pub fn remainder(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .find_map(|l| l.strip_prefix("remainder:"))
            .map(|r| r.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Panic with the captured output unless the exit code is `code`.
    pub fn assert_exit(&self, code: i32) {
        assert_eq!(
            self.code,
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            self.stdout,
            self.stderr
        );
    }
}
