/// Allow-list core: data model, percentage allocation, and validation
/// Pure functions with no I/O; the client module wires them to storage.
pub mod allocation;
pub mod csv;
pub mod types;
pub mod validation;

pub use allocation::{allocate, Percentage, FULL_ALLOCATION_BPS};
pub use types::{
    parse_units, AllowList, AllowlistEntry, InspectionReport, PercentageShare, RawAllowlistRow,
    UploadReceipt, ValidationReport, DEFAULT_TOTAL_UNITS,
};
pub use validation::{
    is_canonical_address, validate_entries, validate_raw, ValidationError, ValidationResult,
};
