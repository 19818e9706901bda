/// Content-addressed storage for allow lists
///
/// The SDK talks to storage through the [`AllowlistStorage`] trait so the
/// creation and inspection flows stay testable without network access;
/// [`IpfsStorageClient`] is the production implementation.
pub mod ipfs;

pub use ipfs::IpfsStorageClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::allowlist::types::AllowList;
use crate::error::Error;

/// Persistence boundary for validated allow lists
#[async_trait]
pub trait AllowlistStorage: Send + Sync {
    /// Persist a validated allow list and return its content identifier
    async fn store_allow_list(&self, allow_list: &AllowList) -> Result<String, Error>;

    /// Fetch a previously persisted allow-list document from a URL or
    /// `ipfs://` location
    async fn fetch_document(&self, location: &str) -> Result<Value, Error>;
}
