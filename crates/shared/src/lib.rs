//! Shared types, errors, and configuration for Closeout.
//!
//! This crate provides common types used across all other crates:
//! - Application configuration (server settings + storage provider secrets)
//! - Application-wide error taxonomy with HTTP status mappings

pub mod config;
pub mod error;

pub use config::{AppConfig, DropboxConfig, ServerConfig};
pub use error::{AppError, AppResult};
