//! Shared utilities for FeedsApp binaries and tests.

pub mod logger;
pub mod time;
