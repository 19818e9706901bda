/// Percentage-to-units allocation for the creation flow
///
/// Converts human-entered percentage shares into exact integer unit
/// allocations summing to a fixed total. All arithmetic is integer-only:
/// percentages become basis points on parse, and unit amounts are
/// computed in 256-bit arithmetic, so nothing is lost at the 10^18
/// scale.
use alloy_primitives::U256;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

use super::types::{AllowlistEntry, PercentageShare};

/// 100% expressed in basis points
pub const BPS_PER_CENT: u64 = 100;
pub const FULL_ALLOCATION_BPS: u64 = 10_000;

/// A percentage with at most two fraction digits, stored as basis points
///
/// `33.34%` is `Percentage(3334)`. Parsing accepts plain decimals only;
/// signs, exponents, and more than two fraction digits are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(u64);

impl Percentage {
    pub fn from_bps(bps: u64) -> Self {
        Self(bps)
    }

    pub fn bps(&self) -> u64 {
        self.0
    }
}

impl FromStr for Percentage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (integer_part, fraction_part) = match trimmed.find('.') {
            Some(dot) => (&trimmed[..dot], &trimmed[dot + 1..]),
            None => (trimmed, ""),
        };

        if integer_part.is_empty() && fraction_part.is_empty() {
            return Err(Error::InvalidPercentage(format!("'{}' is not a decimal number", s)));
        }
        if fraction_part.len() > 2 {
            return Err(Error::InvalidPercentage(format!(
                "'{}' has more than 2 fraction digits",
                s
            )));
        }
        let digits_only =
            |p: &str| p.is_empty() || p.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(integer_part) || !digits_only(fraction_part) {
            return Err(Error::InvalidPercentage(format!("'{}' is not a decimal number", s)));
        }

        let whole: u64 = if integer_part.is_empty() {
            0
        } else {
            integer_part
                .parse()
                .map_err(|_| Error::InvalidPercentage(format!("'{}' is out of range", s)))?
        };

        // "5" -> 0, "5.1" -> 10, "5.12" -> 12
        let fraction: u64 = if fraction_part.is_empty() {
            0
        } else {
            let parsed: u64 = fraction_part
                .parse()
                .map_err(|_| Error::InvalidPercentage(format!("'{}' is out of range", s)))?;
            if fraction_part.len() == 1 {
                parsed * 10
            } else {
                parsed
            }
        };

        whole
            .checked_mul(BPS_PER_CENT)
            .and_then(|w| w.checked_add(fraction))
            .map(Percentage)
            .ok_or_else(|| Error::InvalidPercentage(format!("'{}' is out of range", s)))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / BPS_PER_CENT, self.0 % BPS_PER_CENT)
    }
}

/// Convert percentage shares into unit allocations summing to exactly
/// `total`
///
/// Each entry receives `floor(bps * total / 10_000)` units; whatever the
/// floors lose to rounding is added to the last entry. The last entry is
/// therefore slightly non-proportional whenever the floors round down,
/// which is the documented policy that keeps the output sum exact.
///
/// Shares must sum to exactly 100.00%; anything else fails fast with
/// [`Error::PreconditionViolated`] rather than producing a wrong total.
/// An empty share list is [`Error::EmptyAllowList`]. A 0% share yields 0
/// units and is left in place for the validator to flag.
pub fn allocate(shares: &[PercentageShare], total: U256) -> Result<Vec<AllowlistEntry>, Error> {
    if shares.is_empty() {
        return Err(Error::EmptyAllowList);
    }

    let bps_sum = shares
        .iter()
        .try_fold(0u64, |acc, share| acc.checked_add(share.percentage.bps()))
        .ok_or(Error::PreconditionViolated {
            actual: u64::MAX,
            expected: FULL_ALLOCATION_BPS,
        })?;
    if bps_sum != FULL_ALLOCATION_BPS {
        return Err(Error::PreconditionViolated {
            actual: bps_sum,
            expected: FULL_ALLOCATION_BPS,
        });
    }

    let denominator = U256::from(FULL_ALLOCATION_BPS);
    let mut entries = Vec::with_capacity(shares.len());
    let mut allocated = U256::ZERO;

    for share in shares {
        let units = U256::from(share.percentage.bps()) * total / denominator;
        allocated += units;
        entries.push(AllowlistEntry::new(share.address.clone(), units));
    }

    // The floors can only undershoot; hand the difference to the last entry.
    let remainder = total - allocated;
    if let Some(last) = entries.last_mut() {
        last.units += remainder;
    }

    Ok(entries)
}
