/// Allow-list validation
///
/// Checks a finalized (address, units) list against the structural and
/// numeric rules the minting contract assumes. Every check runs; all
/// violations are collected into one [`ValidationResult`] so a caller can
/// fix a whole bad list in a single pass instead of replaying it error by
/// error.
use alloy_primitives::{Address, U256};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::types::{parse_units, serde_units, AllowlistEntry, ValidationReport};

pub const CATEGORY_GENERAL: &str = "general";
pub const CATEGORY_ADDRESS: &str = "address";
pub const CATEGORY_UNITS: &str = "units";

/// A single rule violation found while validating an allow list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    EmptyAllowList,
    InvalidAddress {
        index: usize,
        address: String,
    },
    InvalidUnits {
        index: usize,
        units: String,
    },
    TotalMismatch {
        #[serde(with = "serde_units")]
        actual: U256,
        #[serde(with = "serde_units")]
        expected: U256,
    },
}

impl ValidationError {
    /// Reporting category this violation is keyed under
    pub fn category(&self) -> &'static str {
        match self {
            ValidationError::EmptyAllowList | ValidationError::TotalMismatch { .. } => {
                CATEGORY_GENERAL
            }
            ValidationError::InvalidAddress { .. } => CATEGORY_ADDRESS,
            ValidationError::InvalidUnits { .. } => CATEGORY_UNITS,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyAllowList => {
                write!(f, "Allow list contains no entries")
            }
            ValidationError::InvalidAddress { index, address } => {
                write!(f, "Entry {} has an invalid address: '{}'", index, address)
            }
            ValidationError::InvalidUnits { index, units } => {
                write!(
                    f,
                    "Entry {} has an invalid number of units: '{}'",
                    index, units
                )
            }
            ValidationError::TotalMismatch { actual, expected } => {
                write!(
                    f,
                    "Allow list distributes {} units, expected {}",
                    actual, expected
                )
            }
        }
    }
}

/// Outcome of validating one allow list
///
/// Serializes as the `{valid, errors: {category: [message, ...]}}` report
/// shape; the typed errors stay available through [`errors`].
///
/// [`errors`]: ValidationResult::errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// True iff no violation was recorded by any check
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations in the order the checks found them
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Category-keyed human-readable report
    pub fn report(&self) -> ValidationReport {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            errors
                .entry(error.category().to_string())
                .or_default()
                .push(error.to_string());
        }
        ValidationReport {
            valid: self.valid(),
            errors,
        }
    }

    fn record(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.report().serialize(serializer)
    }
}

/// True when `address` is a canonical 0x-prefixed, 20-byte hex address
///
/// Mixed-case input is accepted without EIP-55 enforcement.
pub fn is_canonical_address(address: &str) -> bool {
    address.starts_with("0x") && Address::from_str(address).is_ok()
}

/// Validate a finalized allow list against the required `total`
///
/// Checks, all performed regardless of earlier failures:
/// 1. the list is non-empty (an empty list reports only that);
/// 2. every address is canonical;
/// 3. every entry grants a positive number of units;
/// 4. the units sum to exactly `total`. A zero `total` never passes with
///    entries present.
///
/// Pure function: no side effects, safe to call concurrently.
pub fn validate_entries(entries: &[AllowlistEntry], total: U256) -> ValidationResult {
    let mut result = ValidationResult::default();

    if entries.is_empty() {
        result.record(ValidationError::EmptyAllowList);
        return result;
    }

    let mut actual = U256::ZERO;
    for (index, entry) in entries.iter().enumerate() {
        if !is_canonical_address(&entry.address) {
            result.record(ValidationError::InvalidAddress {
                index,
                address: entry.address.clone(),
            });
        }
        if entry.units.is_zero() {
            result.record(ValidationError::InvalidUnits {
                index,
                units: entry.units.to_string(),
            });
        }
        actual = actual.saturating_add(entry.units);
    }

    if actual != total {
        result.record(ValidationError::TotalMismatch {
            actual,
            expected: total,
        });
    }

    result
}

/// Validate untrusted (address, units) string pairs against `total`
///
/// The wire form of an allow list carries units as decimal strings; this
/// variant folds unit-parse failures into the same per-entry reporting as
/// every other violation. Entries whose units do not parse are excluded
/// from the sum check but still hold their index in the report.
pub fn validate_raw(rows: &[(String, String)], total: U256) -> ValidationResult {
    let mut result = ValidationResult::default();

    if rows.is_empty() {
        result.record(ValidationError::EmptyAllowList);
        return result;
    }

    let mut actual = U256::ZERO;
    for (index, (address, units)) in rows.iter().enumerate() {
        if !is_canonical_address(address) {
            result.record(ValidationError::InvalidAddress {
                index,
                address: address.clone(),
            });
        }
        match parse_units(units) {
            Ok(parsed) if !parsed.is_zero() => {
                actual = actual.saturating_add(parsed);
            }
            _ => {
                result.record(ValidationError::InvalidUnits {
                    index,
                    units: units.clone(),
                });
            }
        }
    }

    if actual != total {
        result.record(ValidationError::TotalMismatch {
            actual,
            expected: total,
        });
    }

    result
}
