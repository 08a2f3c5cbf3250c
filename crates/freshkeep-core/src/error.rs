//! Core error types for freshkeep-core.
//!
//! The engine reports four terminal conditions to its callers (`NotFound`,
//! `Forbidden`, `InvalidState`, `InvalidInput`) plus the ambient failures of
//! its collaborators (store, configuration, serialization).

use std::path::PathBuf;
use thiserror::Error;

use crate::inventory::TransitionError;

/// Core error type for freshkeep-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Referenced item or record is absent
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Actor lacks ownership or visibility
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Transition attempted from a state that disallows it
    #[error("Invalid state: {0}")]
    InvalidState(#[from] TransitionError),

    /// Rejected input value
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Storage collaborator failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Quantity must be strictly positive
    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(f64),

    /// Unknown enum value with no fallback rule
    #[error("Unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised by a storage collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same key already exists
    #[error("Record '{0}' already exists")]
    Duplicate(String),

    /// Backend is unavailable or rejected the operation
    #[error("Store backend failure: {0}")]
    Backend(String),

    /// Store lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
