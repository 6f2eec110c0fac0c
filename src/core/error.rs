//! Error types for kaggle-push with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Fatal tool-side errors exit with a code from
//! `ExitCode`; a successful run exits with whatever code the publish command returned.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for kaggle-push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (missing env var, invalid args, missing template)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Validation failure (template rendering produced or would produce bad metadata)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for kaggle-push
#[derive(Debug)]
pub enum PushError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Template rendering errors
  Render(RenderError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PushError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PushError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PushError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PushError::Message { message, context, help } => PushError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PushError::Config(_) => ExitCode::User,
      PushError::Git(_) => ExitCode::System,
      PushError::Render(_) => ExitCode::Validation,
      PushError::Io(_) => ExitCode::System,
      PushError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PushError::Config(e) => e.help_message(),
      PushError::Git(e) => e.help_message(),
      PushError::Render(e) => e.help_message(),
      PushError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PushError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PushError::Config(e) => write!(f, "{}", e),
      PushError::Git(e) => write!(f, "{}", e),
      PushError::Render(e) => write!(f, "{}", e),
      PushError::Io(e) => write!(f, "I/O error: {}", e),
      PushError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PushError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PushError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PushError {
  fn from(err: io::Error) -> Self {
    PushError::Io(err)
  }
}

impl From<String> for PushError {
  fn from(msg: String) -> Self {
    PushError::message(msg)
  }
}

impl From<&str> for PushError {
  fn from(msg: &str) -> Self {
    PushError::message(msg)
  }
}

impl From<serde_json::Error> for PushError {
  fn from(err: serde_json::Error) -> Self {
    PushError::message(format!("JSON error: {}", err))
  }
}

impl From<anyhow::Error> for PushError {
  fn from(err: anyhow::Error) -> Self {
    PushError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Required environment variable is unset or empty
  MissingEnv { var: &'static str },

  /// No template file exists for the selected mode
  TemplateNotFound { mode: String, path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingEnv { var } => Some(format!(
        "Set your Kaggle account name first: export {}=<account>",
        var
      )),
      ConfigError::TemplateNotFound { mode, .. } => Some(format!(
        "Every mode needs a template file. Run from the project root, or add the '{}' template.",
        mode
      )),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingEnv { var } => {
        write!(f, "Environment variable {} is not set", var)
      }
      ConfigError::TemplateNotFound { mode, path } => {
        write!(f, "No template for mode '{}'.\nExpected file: {}", mode, path.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Git executable not on PATH
  NotInstalled,
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { .. } => {
        Some("Run from inside the project repository so the kernel version tag can be derived from git.".to_string())
      }
      GitError::NotInstalled => Some("Install git and make sure it is on your PATH.".to_string()),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::NotInstalled => {
        write!(f, "Git executable not found")
      }
    }
  }
}

/// Template rendering errors
#[derive(Debug)]
pub enum RenderError {
  /// A substitution value would corrupt the rendered JSON
  UnsafeValue { placeholder: &'static str, value: String },

  /// Substituted template is not valid JSON
  Parse { message: String },

  /// Rendered metadata has no `id` field
  MissingId,
}

impl RenderError {
  fn help_message(&self) -> Option<String> {
    match self {
      RenderError::UnsafeValue { placeholder, .. } => Some(format!(
        "The value substituted for {} must not contain quotes, backslashes, or control characters.",
        placeholder
      )),
      RenderError::Parse { .. } => {
        Some("Check that the template is valid JSON around the placeholders.".to_string())
      }
      RenderError::MissingId => {
        Some("Add an \"id\" entry (e.g. \"{username}/my-kernel\") to the template.".to_string())
      }
    }
  }
}

impl fmt::Display for RenderError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RenderError::UnsafeValue { placeholder, value } => {
        write!(f, "Unsafe value for {}: {:?}", placeholder, value)
      }
      RenderError::Parse { message } => {
        write!(f, "Rendered template is not valid JSON: {}", message)
      }
      RenderError::MissingId => {
        write!(f, "Rendered metadata is missing the \"id\" field")
      }
    }
  }
}

/// Result type alias for kaggle-push
pub type PushResult<T> = Result<T, PushError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PushResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PushResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PushError>,
{
  fn context(self, ctx: impl Into<String>) -> PushResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PushResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PushError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
