//! Core error types for timeboxer-core.
//!
//! This module defines the error hierarchy using thiserror. Note that most
//! failure paths in this crate are recovered, not propagated: the delegating
//! recommendation strategy and the task provider degrade to local fallbacks,
//! so these types surface mainly in logs and in third-party extensions.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timeboxer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Recommendation strategy errors
    #[error("Recommendation error: {0}")]
    Recommend(#[from] RecommendError),

    /// Task provider errors
    #[error("Task provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Recommendation-strategy errors.
///
/// The built-in strategies never return these to callers (the deterministic
/// strategy is total and the delegating one falls back internally); the type
/// exists so the orchestrator's recovery protocol holds for any strategy.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Endpoint reachable but answered outside 2xx
    #[error("Recommendation endpoint returned HTTP {status}")]
    Endpoint { status: u16 },

    /// Endpoint unreachable, timed out, or connection dropped
    #[error("Failed to reach recommendation endpoint: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("Failed to decode recommendation response: {0}")]
    Decode(String),

    /// Failure inside a third-party strategy
    #[error("Recommendation strategy failed: {0}")]
    Strategy(String),
}

/// Task pool provider errors.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Endpoint reachable but answered outside 2xx
    #[error("Task endpoint returned HTTP {status}")]
    Endpoint { status: u16 },

    /// Endpoint unreachable, timed out, or connection dropped
    #[error("Failed to reach task endpoint: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("Failed to decode task list: {0}")]
    Decode(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

// Helper implementations for converting from other error types

impl From<reqwest::Error> for RecommendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RecommendError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RecommendError::Endpoint {
                status: status.as_u16(),
            }
        } else {
            RecommendError::Transport(err.to_string())
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Endpoint {
                status: status.as_u16(),
            }
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<tokio::time::error::Elapsed> for RecommendError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        RecommendError::Transport("request timed out".into())
    }
}

impl From<tokio::time::error::Elapsed> for ProviderError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        ProviderError::Transport("request timed out".into())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
