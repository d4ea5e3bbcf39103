//! Core layer
//!
//! Combinators over the crate `Result` shared by the API pipeline and the CLI.

/// `ResultExt` helpers for `Result<T, CustomError>`
pub mod result;
