//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Schema validation adapter and input checks
pub mod validation;

/// Caller-side retry with exponential backoff
pub mod retry;

/// `log` backend for the binary
pub mod logging;
