//! Shared helpers for checksum handling and input limits.

pub mod validation;
