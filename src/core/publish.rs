//! Writing kernel metadata and invoking the kaggle CLI
//!
//! The publish step is deliberately thin: write `kernel-metadata.json`,
//! hand the package directory to `kaggle kernels push`, and pass its exit
//! code through untouched. A failed push leaves the metadata file in place
//! so the operator can inspect or retry by hand.

use crate::core::error::{PushError, PushResult, ResultExt};
use crate::core::template::KernelMetadata;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Output filename, fixed by the kaggle CLI
pub const METADATA_FILE: &str = "kernel-metadata.json";

/// Invokes the external publisher against a package directory
pub struct KernelPublisher {
  /// Publish executable, normally `kaggle`; explicit so tests can substitute a fake
  program: PathBuf,

  /// Directory handed to `kernels push -p`
  package_dir: PathBuf,
}

impl KernelPublisher {
  /// Publisher for a package directory, using the real kaggle CLI
  pub fn new(package_dir: &Path) -> Self {
    Self::with_program(Path::new("kaggle"), package_dir)
  }

  /// Publisher using an explicit publish executable
  pub fn with_program(program: &Path, package_dir: &Path) -> Self {
    Self {
      program: program.to_path_buf(),
      package_dir: package_dir.to_path_buf(),
    }
  }

  /// Write `kernel-metadata.json` into the package directory, overwriting any
  /// previous file. Indented with 4 spaces for human readability.
  pub fn write_metadata(&self, meta: &KernelMetadata) -> PushResult<PathBuf> {
    let path = self.package_dir.join(METADATA_FILE);

    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    meta
      .serialize(&mut ser)
      .with_context(|| format!("Failed to serialize {}", METADATA_FILE))?;

    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(path)
  }

  /// Run `<program> kernels push -p <package_dir>` with inherited stdio and
  /// return the child's exit code verbatim.
  ///
  /// The exit status is not interpreted here: the caller exits with it, so a
  /// publisher failure surfaces exactly as the kaggle CLI reported it.
  pub fn push(&self) -> PushResult<i32> {
    let status = Command::new(&self.program)
      .arg("kernels")
      .arg("push")
      .arg("-p")
      .arg(&self.package_dir)
      .status();

    let status = match status {
      Ok(status) => status,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(PushError::with_help(
          format!("Publish command not found: {}", self.program.display()),
          "Install the kaggle CLI (pip install kaggle) and make sure it is on your PATH.",
        ));
      }
      Err(e) => {
        return Err(PushError::Io(e)).with_context(|| format!("Failed to run {}", self.program.display()));
      }
    };

    // None means the child was killed by a signal; report it as a plain failure
    Ok(status.code().unwrap_or(1))
  }
}
