//! Filesystem layer for artman
//!
//! Provides lexical path resolution against a root directory and
//! format-agnostic loading and saving of configuration files.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use path::{NormalizedPath, resolve, resolve_root};
