//! Shared test utilities for the artman workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: the IAM sample configs under `test-fixtures/artman/`
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace), a scratch
//!   directory with config files written into it

pub mod fixtures;
pub mod workspace;
