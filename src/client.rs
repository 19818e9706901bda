/// Allow-list SDK client
///
/// Main entry point tying the pure core (allocation, validation, the
/// Merkle codec) to configuration and storage. Three flows are exposed:
/// percentage-based creation, unit-based upload, and inspection of a
/// previously persisted list.
use alloy_primitives::U256;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::allowlist::{
    allocation, csv,
    types::{AllowList, AllowlistEntry, InspectionReport, PercentageShare, UploadReceipt},
    validation,
};
use crate::config::AllowlistConfig;
use crate::error::Error;
use crate::merkle::StandardMerkleTree;
use crate::storage::{AllowlistStorage, IpfsStorageClient};

pub struct AllowlistClient {
    config: AllowlistConfig,
    storage: Arc<dyn AllowlistStorage>,
}

impl AllowlistClient {
    /// Create a client backed by the IPFS storage implementation
    pub fn new(config: AllowlistConfig) -> Result<Self, Error> {
        let storage = Arc::new(IpfsStorageClient::new(&config.network)?);
        Ok(Self { config, storage })
    }

    /// Create a client with an injected storage backend
    pub fn with_storage(config: AllowlistConfig, storage: Arc<dyn AllowlistStorage>) -> Self {
        Self { config, storage }
    }

    pub fn config(&self) -> &AllowlistConfig {
        &self.config
    }

    /// Total units every list handled by this client must distribute
    pub fn total_units(&self) -> U256 {
        self.config.network.total_units
    }

    /// Creation flow: convert percentage shares to units, validate, and
    /// persist
    ///
    /// Shares must sum to exactly 100%; the allocator fails fast
    /// otherwise. Validation failures come back in the receipt with
    /// `cid: None` and nothing persisted.
    pub async fn create_from_percentages(
        &self,
        shares: &[PercentageShare],
    ) -> Result<UploadReceipt, Error> {
        let entries = allocation::allocate(shares, self.total_units())?;
        self.upload_allow_list(AllowList::new(entries, self.total_units()))
            .await
    }

    /// Upload flow: validate a finalized units list and persist it
    pub async fn upload_allow_list(&self, allow_list: AllowList) -> Result<UploadReceipt, Error> {
        let validation = validation::validate_entries(&allow_list.entries, allow_list.total_units);
        if !validation.valid() {
            warn!(
                errors = validation.errors().len(),
                "refusing to store invalid allow list"
            );
            return Ok(UploadReceipt {
                cid: None,
                validation,
            });
        }

        let cid = self.storage.store_allow_list(&allow_list).await?;
        debug!(%cid, entries = allow_list.entries.len(), "allow list stored");
        Ok(UploadReceipt {
            cid: Some(cid),
            validation,
        })
    }

    /// Upload flow over a CSV template (`address`, `fractions` columns)
    pub async fn upload_csv(&self, bytes: &[u8]) -> Result<UploadReceipt, Error> {
        let rows = csv::parse_rows(bytes)?;
        let shares = rows
            .iter()
            .enumerate()
            .map(|(line, row)| {
                let percentage = row.fractions.parse().map_err(|e| {
                    Error::Csv(format!(
                        "Row {}: invalid fraction '{}': {}",
                        line, row.fractions, e
                    ))
                })?;
                Ok(PercentageShare::new(row.address.clone(), percentage))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        self.create_from_percentages(&shares).await
    }

    /// Inspection flow: fetch a persisted allow list, decode its Merkle
    /// envelope, and re-validate it against the configured total
    pub async fn inspect(&self, location: &str) -> Result<InspectionReport, Error> {
        let document = self.storage.fetch_document(location).await?;
        let tree = StandardMerkleTree::from_document(document)?;

        let entries: Vec<AllowlistEntry> =
            tree.entries().map(|(_, entry)| entry.clone()).collect();
        let list = AllowList::new(entries, self.total_units());
        let validation = validation::validate_entries(&list.entries, list.total_units);

        debug!(
            records = list.entries.len(),
            valid = validation.valid(),
            "inspected allow list"
        );

        Ok(InspectionReport {
            record_count: list.entries.len(),
            total_units: list.unit_sum(),
            merkle_root: tree.root().to_string(),
            entries: list.entries,
            validation,
        })
    }
}
