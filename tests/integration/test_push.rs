//! End-to-end tests for the push command
//!
//! Each test drives the real binary against a temp git repo, with a fake
//! `kaggle` executable on PATH recording every invocation.

use crate::helpers::{INFERENCE_TEMPLATE, TestWorkspace, run_kaggle_push};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_push_train_with_clean_tree() {
  let ws = TestWorkspace::new().unwrap();
  let head = ws.short_head().unwrap();

  let output = ws.run_push(&["--mode", "train"], Some("alice"), &[]).unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  // Rendered metadata embeds the username and the bare (clean) tag
  let written = fs::read_to_string(ws.metadata_file()).unwrap();
  let meta: serde_json::Value = serde_json::from_str(&written).unwrap();
  assert_eq!(meta["id"], format!("alice/demo-train-{}", head));
  assert!(!written.contains("-dirty"));

  // No placeholder survives rendering
  for token in ["{username}", "{tag}", "{date}"] {
    assert!(!written.contains(token), "{} survived", token);
  }

  // The date placeholder was filled with today's date
  let today = chrono::Local::now().format("%Y-%m-%d").to_string();
  assert_eq!(meta["title"], format!("demo train {} ({})", head, today));

  // Publisher invoked exactly once with the package directory
  let calls = ws.kaggle_calls();
  assert_eq!(calls.len(), 1);
  let package_dir = ws.path.canonicalize().unwrap();
  assert_eq!(calls[0], format!("kernels push -p {}", package_dir.display()));

  // Operator-visible mode and kernel id lines
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Mode: train"));
  assert!(stdout.contains(&format!("Pushing kernel: alice/demo-train-{}...", head)));
}

#[test]
fn test_push_with_dirty_tree_appends_dirty_suffix() {
  let ws = TestWorkspace::new().unwrap();
  let head = ws.short_head().unwrap();

  ws.write_file("scratch.txt", "uncommitted\n").unwrap();

  let output = ws.run_push(&["--mode", "train"], Some("alice"), &[]).unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(ws.metadata_file()).unwrap()).unwrap();
  assert_eq!(meta["id"], format!("alice/demo-train-{}-dirty", head));
}

#[test]
fn test_push_inference_uses_inference_template() {
  let ws = TestWorkspace::new().unwrap();
  let head = ws.short_head().unwrap();

  let output = ws.run_push(&["--mode", "inference"], Some("bob"), &[]).unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(ws.metadata_file()).unwrap()).unwrap();
  assert_eq!(meta["id"], format!("bob/demo-inference-{}", head));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Mode: inference"));
}

#[test]
fn test_unknown_mode_fails_without_side_effects() {
  let ws = TestWorkspace::new().unwrap();

  let output = ws.run_push(&["--mode", "deploy"], Some("alice"), &[]).unwrap();
  assert!(!output.status.success());

  assert!(!ws.metadata_file().exists());
  assert!(ws.kaggle_calls().is_empty());
}

#[test]
fn test_missing_username_fails_before_any_git_query() {
  // Not a git repo: if the env check ran after the git query, the error
  // would be about git, not about the variable.
  let dir = TempDir::new().unwrap();
  fs::create_dir_all(dir.path().join("templates")).unwrap();
  fs::write(
    dir.path().join("templates/kernel-metadata.train.template.json"),
    r#"{"id": "{username}/demo"}"#,
  )
  .unwrap();

  let output = run_kaggle_push(dir.path(), &["--mode", "train"], None, &[]).unwrap();
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("KAGGLE_USERNAME"));
  assert!(!stderr.contains("repository"));
  assert!(!dir.path().join("kernel-metadata.json").exists());
}

#[test]
fn test_missing_template_fails_before_publish() {
  let ws = TestWorkspace::new().unwrap();
  fs::remove_file(ws.path.join(INFERENCE_TEMPLATE)).unwrap();

  let output = ws.run_push(&["--mode", "inference"], Some("alice"), &[]).unwrap();
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No template for mode 'inference'"));
  assert!(!ws.metadata_file().exists());
  assert!(ws.kaggle_calls().is_empty());
}

#[test]
fn test_outside_a_repository_is_a_git_error() {
  let dir = TempDir::new().unwrap();
  fs::create_dir_all(dir.path().join("templates")).unwrap();
  fs::write(
    dir.path().join("templates/kernel-metadata.train.template.json"),
    r#"{"id": "{username}/demo"}"#,
  )
  .unwrap();

  let output = run_kaggle_push(dir.path(), &["--mode", "train"], Some("alice"), &[]).unwrap();
  assert_eq!(output.status.code(), Some(2));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Git repository not found"));
  assert!(!dir.path().join("kernel-metadata.json").exists());
}

#[test]
fn test_publisher_exit_code_is_inherited() {
  let ws = TestWorkspace::new().unwrap();

  let output = ws
    .run_push(&["--mode", "train"], Some("alice"), &[("FAKE_KAGGLE_EXIT", "3")])
    .unwrap();
  assert_eq!(output.status.code(), Some(3));

  // The rendered file stays in place for inspection
  assert!(ws.metadata_file().exists());
  assert_eq!(ws.kaggle_calls().len(), 1);
}
