//! Utility modules.

/// Unix timestamp helpers for human-readable API timestamps.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
