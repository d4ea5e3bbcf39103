//! Storage layer
//!
//! Configuration profiles live in a TOML file under the user config
//! directory; the API key is only ever read from the environment or the
//! command line.

use crate::error::StorageError;

/// Configuration file management (TOML)
pub mod config;

/// API key resolution
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
