//! Best-effort repository version probe.
//!
//! An optional capability: when the model runs from a git checkout the
//! revision and any uncommitted files are recorded in the log and exposed
//! through `component_name`. Absence of git, or running outside a
//! repository, is an explicit "unavailable" result, never an error.

use std::process::Command;

/// Repository revision metadata captured at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Output of `git describe --always`
    pub revision: String,
    /// Files with uncommitted changes
    pub uncommitted: Vec<String>,
}

impl VersionInfo {
    /// Probe the working directory for version metadata.
    ///
    /// Returns `None` when git is unavailable or the probe fails for any
    /// reason.
    pub fn detect() -> Option<Self> {
        let revision = git_stdout(&["describe", "--always"])?;
        if revision.is_empty() {
            return None;
        }
        let uncommitted = git_stdout(&["diff", "--name-only"])
            .map(|out| {
                out.lines()
                    .map(str::to_string)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Some(Self {
            revision,
            uncommitted,
        })
    }
}

fn git_stdout(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8(output.stdout).ok()?.trim().to_string())
}
