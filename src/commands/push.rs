//! Render kernel metadata for a mode and push it with the kaggle CLI

use crate::core::config::{Mode, PushConfig};
use crate::core::error::{PushResult, ResultExt};
use crate::core::publish::KernelPublisher;
use crate::core::template::{self, Substitutions};
use crate::core::vcs::SystemGit;
use std::env;
use std::fs;

/// Run the push command. Returns the publisher's exit code on success.
///
/// Steps, in order: validate configuration, read git state, render the
/// template, write `kernel-metadata.json`, invoke `kaggle kernels push`.
/// Each step aborts the run before the next one's side effects.
pub fn run_push(mode: Mode) -> PushResult<i32> {
  let package_dir = env::current_dir().map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;

  // Validate env and template mapping before any subprocess runs
  let config = PushConfig::from_env(mode, &package_dir)?;

  let git = SystemGit::open(&package_dir)?;
  let revision = git.revision_state()?;

  let subs = Substitutions {
    username: config.username.clone(),
    tag: revision.tag(),
    date: chrono::Local::now().format("%Y-%m-%d").to_string(),
  };

  let raw = fs::read_to_string(&config.template_path)
    .with_context(|| format!("Failed to read template {}", config.template_path.display()))?;
  let meta = template::render(&raw, &subs)?;

  let publisher = KernelPublisher::new(&package_dir);
  publisher.write_metadata(&meta)?;

  println!("Mode: {}", mode);
  println!("🚀 Pushing kernel: {}...", meta.id);

  publisher.push()
}
