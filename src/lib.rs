pub mod allowlist;
pub mod client;
pub mod config;
pub mod error;
pub mod merkle;
pub mod storage;

// Main client exports
pub use client::AllowlistClient;
pub use config::{AllowlistConfig, NetworkConstants};
pub use error::Error;

// Core allow-list exports
pub use allowlist::{
    allocate, is_canonical_address, parse_units, validate_entries, validate_raw, AllowList,
    AllowlistEntry, InspectionReport, Percentage, PercentageShare, RawAllowlistRow, UploadReceipt,
    ValidationError, ValidationReport, ValidationResult, DEFAULT_TOTAL_UNITS,
};

// Merkle codec exports
pub use merkle::{StandardMerkleTree, TreeDump, TREE_FORMAT};

// Storage exports
pub use storage::{AllowlistStorage, IpfsStorageClient};

// Re-export the primitive types used throughout the public API
pub use alloy_primitives::{Address, B256, U256};
