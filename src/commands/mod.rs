//! CLI commands for kaggle-push
//!
//! - **push**: render the mode's metadata template and push the kernel

pub mod push;

pub use push::run_push;
