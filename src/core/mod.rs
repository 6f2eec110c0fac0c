//! Core engine for kaggle-push
//!
//! - **config**: run configuration (account, mode, template mapping), validated at startup
//! - **error**: error types with contextual help messages and exit codes
//! - **template**: placeholder substitution and metadata parsing
//! - **publish**: metadata file writing and kaggle CLI invocation
//! - **vcs**: git state queries (SystemGit)

pub mod config;
pub mod error;
pub mod publish;
pub mod template;
pub mod vcs;
