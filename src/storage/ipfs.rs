/// IPFS-backed allow-list storage
///
/// Uploads go to a pinning-service HTTP API as the `standard-v1` Merkle
/// dump of the list; fetches resolve `ipfs://` locations through the
/// configured subdomain gateway.
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::allowlist::types::AllowList;
use crate::config::NetworkConstants;
use crate::error::Error;
use crate::merkle::StandardMerkleTree;

use super::AllowlistStorage;

pub struct IpfsStorageClient {
    http_client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
    gateway_host: String,
}

impl IpfsStorageClient {
    /// Create a storage client from network constants
    pub fn new(constants: &NetworkConstants) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(constants.request_timeout_secs))
            .build()
            .map_err(|e| Error::Storage(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: constants.storage_api_url.trim_end_matches('/').to_string(),
            api_token: constants.storage_api_token.clone(),
            gateway_host: constants.ipfs_gateway_host.clone(),
        })
    }

    /// Resolve an allow-list location to a fetchable HTTPS URL
    ///
    /// `ipfs://<cid>` becomes `https://<cid>.ipfs.<gateway_host>`; plain
    /// http(s) URLs pass through; anything else is rejected.
    fn resolve_location(&self, location: &str) -> Result<Url, Error> {
        let target = match location.strip_prefix("ipfs://") {
            Some(cid) => {
                let cid = cid.trim_matches('/');
                if cid.is_empty() {
                    return Err(Error::Storage(format!(
                        "Allow list location '{}' carries no CID",
                        location
                    )));
                }
                format!("https://{}.ipfs.{}", cid, self.gateway_host)
            }
            None => location.to_string(),
        };

        let url = Url::parse(&target)
            .map_err(|e| Error::Storage(format!("Invalid allow list URL '{}': {}", location, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::Storage(format!(
                "Unsupported allow list URL scheme '{}'",
                other
            ))),
        }
    }
}

#[async_trait]
impl AllowlistStorage for IpfsStorageClient {
    async fn store_allow_list(&self, allow_list: &AllowList) -> Result<String, Error> {
        let tree = StandardMerkleTree::of(&allow_list.entries)?;
        let dump = tree.dump();
        debug!(
            entries = allow_list.entries.len(),
            root = %tree.root(),
            "uploading allow list"
        );

        let mut request = self
            .http_client
            .post(format!("{}/upload", self.api_url))
            .json(&dump);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to upload allow list: {}", e)))?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "Storage API error ({}): {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Storage(format!("Failed to parse upload response: {}", e)))?;
        let cid = body
            .get("cid")
            .and_then(|c| c.as_str())
            .ok_or_else(|| Error::Storage("Upload response carries no CID".to_string()))?;

        Ok(cid.to_string())
    }

    async fn fetch_document(&self, location: &str) -> Result<Value, Error> {
        let url = self.resolve_location(location)?;
        debug!(%url, "fetching allow list");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to fetch allow list: {}", e)))?;
        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "Allow list fetch failed with status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Storage(format!("Failed to read allow list body: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| {
            Error::MalformedAllowList(format!("Fetched document is not JSON: {}", e))
        })
    }
}
