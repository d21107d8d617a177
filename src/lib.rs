//! docweave: the ignore-rule-aware tree walking and document generation
//! engine behind a repository browsing tool.
//!
//! A UI/IPC shell drives this crate through [`Engine`]: list a repository's
//! filtered tree, inspect or reset the effective ignore rules, and generate
//! one of two artifacts with integer percent progress published to a
//! [`ProgressSink`]. "Code" mode concatenates selected file contents;
//! "structure" mode renders an indented listing of the selected hierarchy.
//!
//! Ignore rules merge three layers for each repository root: built-in
//! defaults, a per-user global rule file, and the repo-local `.docignore`.
//! Resolved rule sets are cached per root until explicitly reset.

pub mod config;
pub mod core;
pub mod engine;

pub use crate::core::progress::{ChannelSink, NullSink, ProgressSink};
pub use crate::core::{CoreError, JobOutcome, NodeKind, TreeNode};
pub use engine::{Engine, GenerateMode};
