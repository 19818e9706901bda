/// Error types for the allowlist SDK
use thiserror::Error;

/// Crate-wide error type
///
/// Per-entry validation failures (bad address, bad units, total mismatch)
/// are not surfaced here; they are collected as data in
/// [`crate::allowlist::ValidationResult`] so a caller sees every violation
/// in one pass.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend (IPFS API or gateway) failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// CSV template could not be parsed
    #[error("CSV error: {0}")]
    Csv(String),

    /// A fetched allow list document could not be decoded
    #[error("Malformed allow list: {0}")]
    MalformedAllowList(String),

    /// An operation was handed an allow list with no entries
    #[error("Allow list contains no entries")]
    EmptyAllowList,

    /// A percentage share could not be parsed
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    /// Percentage shares handed to the allocator do not sum to 100%
    #[error("Percentage shares sum to {actual} basis points, expected {expected}")]
    PreconditionViolated { actual: u64, expected: u64 },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
