//! System git backend - zero dependencies
//!
//! Uses two read-only plumbing queries per run:
//! - `rev-parse --short HEAD` for the abbreviated revision id
//! - `status --porcelain` for the dirty flag
//!
//! Subprocesses run with an isolated environment so user git config
//! cannot change the output formats we parse.

use crate::core::error::{GitError, PushError, PushResult, ResultExt};
use crate::core::vcs::RevisionState;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
#[derive(Debug)]
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to verify the path is inside a working copy.
  pub fn open(path: &Path) -> PushResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output();

    let output = match output {
      Ok(output) => output,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(PushError::Git(GitError::NotInstalled));
      }
      Err(e) => return Err(PushError::Io(e)).context("Failed to execute git rev-parse"),
    };

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(PushError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(PushError::message(format!("Failed to open git repository: {}", stderr)));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Get the abbreviated HEAD commit SHA
  pub fn short_head(&self) -> PushResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--short", "HEAD"])
      .output()
      .context("Failed to get HEAD commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(PushError::Git(GitError::CommandFailed {
        command: "git rev-parse --short HEAD".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Check whether the working tree has uncommitted changes
  ///
  /// Any `status --porcelain` output counts: staged, modified, or untracked.
  pub fn is_dirty(&self) -> PushResult<bool> {
    let output = self
      .git_cmd()
      .args(["status", "--porcelain"])
      .output()
      .context("Failed to check working tree status")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(PushError::Git(GitError::CommandFailed {
        command: "git status --porcelain".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
  }

  /// Read the full revision state (short SHA + dirty flag) in one call
  pub fn revision_state(&self) -> PushResult<RevisionState> {
    let short_sha = self.short_head()?;
    let dirty = self.is_dirty()?;
    Ok(RevisionState { short_sha, dirty })
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
