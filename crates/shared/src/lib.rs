//! Shared utilities and common types for the AppHub backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Key hashing for the admin API key
//! - Human-readable size and count formatting
//! - Limit/offset window resolution
//! - Common validation logic

pub mod crypto;
pub mod format;
pub mod pagination;
pub mod validation;
