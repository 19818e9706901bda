/// Allow-list data model shared across the creation, upload, and
/// inspection flows
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::allocation::Percentage;

/// Total supply gated by an allow list: 10^18 base units ("one unit-ether")
pub const DEFAULT_TOTAL_UNITS: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// A single allow-list entry granting `units` of the minting allocation
/// to `address`
///
/// The address is kept as the caller-supplied string; format checking is
/// the validator's job so that malformed input can be reported alongside
/// every other violation instead of failing construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistEntry {
    pub address: String,
    #[serde(with = "serde_units")]
    pub units: U256,
}

impl AllowlistEntry {
    pub fn new(address: impl Into<String>, units: U256) -> Self {
        Self {
            address: address.into(),
            units,
        }
    }
}

/// An ordered allow list plus the total it must distribute
///
/// Order is significant: the allocator assigns its rounding remainder to
/// the last entry, and the inspection flow renders entries in stored
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    pub entries: Vec<AllowlistEntry>,
    #[serde(with = "serde_units")]
    pub total_units: U256,
}

impl AllowList {
    pub fn new(entries: Vec<AllowlistEntry>, total_units: U256) -> Self {
        Self {
            entries,
            total_units,
        }
    }

    /// Sum of all entry units, saturating at `U256::MAX`
    pub fn unit_sum(&self) -> U256 {
        self.entries
            .iter()
            .fold(U256::ZERO, |acc, e| acc.saturating_add(e.units))
    }
}

/// Input row for the percentage-based creation flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageShare {
    pub address: String,
    pub percentage: Percentage,
}

impl PercentageShare {
    pub fn new(address: impl Into<String>, percentage: Percentage) -> Self {
        Self {
            address: address.into(),
            percentage,
        }
    }
}

/// Untrusted row produced by the CSV template parser
///
/// Values are passed through verbatim; the allocator and validator decide
/// what is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAllowlistRow {
    pub address: String,
    pub fractions: String,
}

/// Result of an upload flow: the CID when the list was persisted, plus
/// the full validation outcome either way
///
/// `cid` is `None` exactly when validation failed; nothing is persisted
/// for an invalid list.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    pub cid: Option<String>,
    pub validation: super::validation::ValidationResult,
}

/// Result of the inspection flow over a fetched allow list
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    /// Entries in their original (value) order
    pub entries: Vec<AllowlistEntry>,
    /// Number of decoded entries
    pub record_count: usize,
    /// Sum of decoded units
    #[serde(with = "serde_units")]
    pub total_units: U256,
    /// Merkle root the fetched document commits to
    pub merkle_root: String,
    pub validation: super::validation::ValidationResult,
}

/// Category-keyed, human-readable rendering of a validation outcome,
/// matching the `{valid, errors: {category: [message, ...]}}` wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Parse a base-10 integer unit amount
///
/// Rejects signs, decimal points, and anything else that is not a plain
/// run of ASCII digits, so "1.5" or "-3" never sneak through `U256`'s
/// more permissive parser.
pub fn parse_units(raw: &str) -> Result<U256, UnitsParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UnitsParseError("empty units value".to_string()));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UnitsParseError(format!(
            "'{}' is not a base-10 integer",
            raw
        )));
    }
    U256::from_str_radix(trimmed, 10)
        .map_err(|_| UnitsParseError(format!("'{}' overflows 256 bits", raw)))
}

/// Failure to parse a decimal units string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitsParseError(pub String);

impl fmt::Display for UnitsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UnitsParseError {}

/// Serde adapter storing `U256` units as decimal integer strings
pub(crate) mod serde_units {
    use alloy_primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(units: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&units.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_units(&raw).map_err(de::Error::custom)
    }
}
