/// Unit tests for allow-list validation

use allowlist_sdk::{
    allocate, validate_entries, validate_raw, AllowlistEntry, PercentageShare, ValidationError,
    DEFAULT_TOTAL_UNITS, U256,
};

const ADDR_A: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
const ADDR_B: &str = "0x1111111111111111111111111111111111111111";

#[test]
fn test_empty_list_reports_only_empty_allow_list() {
    let result = validate_entries(&[], DEFAULT_TOTAL_UNITS);

    assert!(!result.valid());
    assert_eq!(result.errors(), &[ValidationError::EmptyAllowList]);

    let report = result.report();
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors.contains_key("general"));
}

#[test]
fn test_valid_single_entry_list() {
    let entries = vec![AllowlistEntry::new(ADDR_A, DEFAULT_TOTAL_UNITS)];

    let result = validate_entries(&entries, DEFAULT_TOTAL_UNITS);

    assert!(result.valid());
    assert!(result.errors().is_empty());
    assert!(result.report().errors.is_empty());
}

#[test]
fn test_multiple_violations_are_all_reported() {
    // Entry 0 holds the whole total behind a malformed address; entry 1
    // is well-addressed but grants nothing. Both must surface at once.
    let entries = vec![
        AllowlistEntry::new("not-an-address", DEFAULT_TOTAL_UNITS),
        AllowlistEntry::new(ADDR_B, U256::ZERO),
    ];

    let result = validate_entries(&entries, DEFAULT_TOTAL_UNITS);

    assert!(!result.valid());
    assert_eq!(result.errors().len(), 2);
    assert!(matches!(
        result.errors()[0],
        ValidationError::InvalidAddress { index: 0, .. }
    ));
    assert!(matches!(
        result.errors()[1],
        ValidationError::InvalidUnits { index: 1, .. }
    ));

    let report = result.report();
    assert!(report.errors.contains_key("address"));
    assert!(report.errors.contains_key("units"));
    assert!(report.errors["address"][0].contains("Entry 0"));
    assert!(report.errors["units"][0].contains("Entry 1"));
}

#[test]
fn test_address_format_rules() {
    let cases = [
        (ADDR_A, true),                                          // checksummed
        ("0x742d35cc6634c0532925a3b844bc454e4438f44e", true),    // lowercase
        ("742d35Cc6634C0532925a3b844Bc454e4438f44e", false),     // missing 0x
        ("0x742d35Cc6634C0532925a3b844Bc454e4438f44", false),    // too short
        ("0x742d35Cc6634C0532925a3b844Bc454e4438f44ef", false),  // too long
        ("0xZZ2d35Cc6634C0532925a3b844Bc454e4438f44e", false),   // not hex
    ];

    for (address, expected_valid) in cases {
        let entries = vec![AllowlistEntry::new(address, DEFAULT_TOTAL_UNITS)];
        let result = validate_entries(&entries, DEFAULT_TOTAL_UNITS);
        assert_eq!(
            result.valid(),
            expected_valid,
            "address '{}' validity mismatch",
            address
        );
    }
}

#[test]
fn test_total_mismatch_names_both_sums() {
    let entries = vec![
        AllowlistEntry::new(ADDR_A, U256::from(60u64)),
        AllowlistEntry::new(ADDR_B, U256::from(30u64)),
    ];

    let result = validate_entries(&entries, U256::from(100u64));

    assert!(!result.valid());
    assert_eq!(
        result.errors(),
        &[ValidationError::TotalMismatch {
            actual: U256::from(90u64),
            expected: U256::from(100u64),
        }]
    );
    let report = result.report();
    assert!(report.errors["general"][0].contains("90"));
    assert!(report.errors["general"][0].contains("100"));
}

#[test]
fn test_zero_total_never_passes_with_entries() {
    let entries = vec![AllowlistEntry::new(ADDR_A, U256::from(1u64))];

    let result = validate_entries(&entries, U256::ZERO);

    assert!(!result.valid());
    assert!(result
        .errors()
        .iter()
        .any(|e| matches!(e, ValidationError::TotalMismatch { .. })));
}

#[test]
fn test_duplicate_addresses_are_permitted() {
    let half = DEFAULT_TOTAL_UNITS / U256::from(2u64);
    let entries = vec![
        AllowlistEntry::new(ADDR_A, half),
        AllowlistEntry::new(ADDR_A, half),
    ];

    let result = validate_entries(&entries, DEFAULT_TOTAL_UNITS);
    assert!(result.valid());
}

#[test]
fn test_allocate_then_validate_round_trip() {
    let shares = vec![
        PercentageShare::new(ADDR_A, "60".parse().unwrap()),
        PercentageShare::new(ADDR_B, "40".parse().unwrap()),
    ];

    let entries = allocate(&shares, DEFAULT_TOTAL_UNITS).unwrap();
    let result = validate_entries(&entries, DEFAULT_TOTAL_UNITS);

    assert!(result.valid(), "errors: {:?}", result.errors());
}

#[test]
fn test_validate_raw_folds_parse_failures_into_report() {
    let rows = vec![
        (ADDR_A.to_string(), "60".to_string()),
        (ADDR_B.to_string(), "12.5".to_string()),
        ("bogus".to_string(), "40".to_string()),
    ];

    let result = validate_raw(&rows, U256::from(100u64));

    assert!(!result.valid());
    assert!(matches!(
        result.errors()[0],
        ValidationError::InvalidUnits { index: 1, .. }
    ));
    assert!(matches!(
        result.errors()[1],
        ValidationError::InvalidAddress { index: 2, .. }
    ));
    // Parseable units still participate in the sum check: 60 + 40 = 100.
    assert_eq!(result.errors().len(), 2);
}

#[test]
fn test_validate_raw_accepts_clean_input() {
    let rows = vec![
        (ADDR_A.to_string(), "70".to_string()),
        (ADDR_B.to_string(), "30".to_string()),
    ];

    let result = validate_raw(&rows, U256::from(100u64));
    assert!(result.valid(), "errors: {:?}", result.errors());
}

#[test]
fn test_validation_result_serializes_as_report() {
    let result = validate_entries(&[], DEFAULT_TOTAL_UNITS);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["valid"], serde_json::Value::Bool(false));
    assert!(json["errors"]["general"].is_array());
}
