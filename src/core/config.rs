//! Run configuration: publishing account and mode-selected template
//!
//! Everything here is validated once at startup, before any subprocess runs.

use crate::core::error::{ConfigError, PushError, PushResult};
use clap::ValueEnum;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the Kaggle account name
pub const USERNAME_ENV: &str = "KAGGLE_USERNAME";

/// Which kernel template governs the pushed metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
  /// Training kernel
  Train,
  /// Inference (submission) kernel
  Inference,
}

impl Mode {
  /// Template file for this mode, relative to the package directory
  pub fn template_path(self) -> &'static Path {
    match self {
      Mode::Train => Path::new("templates/kernel-metadata.train.template.json"),
      Mode::Inference => Path::new("templates/kernel-metadata.inference.template.json"),
    }
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mode::Train => write!(f, "train"),
      Mode::Inference => write!(f, "inference"),
    }
  }
}

/// Validated configuration for a push run
#[derive(Debug, Clone)]
pub struct PushConfig {
  /// Kaggle account the kernel is published under
  pub username: String,

  /// Resolved template file for the selected mode
  pub template_path: PathBuf,
}

impl PushConfig {
  /// Load and validate configuration from the process environment
  pub fn from_env(mode: Mode, package_dir: &Path) -> PushResult<Self> {
    Self::new(env::var(USERNAME_ENV).ok(), mode, package_dir)
  }

  fn new(username: Option<String>, mode: Mode, package_dir: &Path) -> PushResult<Self> {
    let username = username
      .filter(|u| !u.trim().is_empty())
      .ok_or(PushError::Config(ConfigError::MissingEnv { var: USERNAME_ENV }))?;

    let template_path = package_dir.join(mode.template_path());
    if !template_path.is_file() {
      return Err(PushError::Config(ConfigError::TemplateNotFound {
        mode: mode.to_string(),
        path: template_path,
      }));
    }

    Ok(Self { username, template_path })
  }
}
