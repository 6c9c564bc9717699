//! Engine error type

use thiserror::Error;

/// Errors raised when a caller violates an input invariant.
///
/// Arithmetic edge cases (flat price windows, zero losses) never surface here;
/// they fall back to neutral values inside the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A price, bankroll, or expiry outside its valid domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A manual market price that cannot be stored
    #[error("Invalid override: {0}")]
    InvalidOverride(String),

    /// Configuration that would leave the engine unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
