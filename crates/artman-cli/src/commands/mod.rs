//! Command implementations for artman-cli

pub mod configure;
pub mod run;

pub use configure::{ConfigureArgs, run_configure};
pub use run::run_resolve;
