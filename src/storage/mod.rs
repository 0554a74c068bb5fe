//! Storage layer for gym-cli
//!
//! Handles configuration management and session credential storage.
//! Uses the OS keyring for the session token and TOML for configuration
//! files.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
