//! Unit tests for ScanPolicy parsing and naming

use bootwire_domain::constants::SCAN_POLICY_KEY;
use bootwire_domain::{Error, ScanPolicy};

#[test]
fn test_default_policy_is_on() {
    assert_eq!(ScanPolicy::default(), ScanPolicy::On);
}

#[test]
fn test_parse_every_policy_in_any_case() {
    for policy in ScanPolicy::ALL {
        let upper = policy.name().to_string();
        let lower = upper.to_lowercase();
        let mixed: String = upper
            .chars()
            .enumerate()
            .map(|(i, c)| if i % 2 == 0 { c.to_ascii_lowercase() } else { c })
            .collect();

        for input in [upper, lower, mixed] {
            let parsed: ScanPolicy = input.parse().expect("known policy should parse");
            assert_eq!(parsed, policy, "input {input:?}");
        }
    }
}

#[test]
fn test_parse_unknown_policy_names_value() {
    let err = "bogus".parse::<ScanPolicy>().unwrap_err();
    match err {
        Error::InvalidConfiguration { key, value } => {
            assert_eq!(key, SCAN_POLICY_KEY);
            assert_eq!(value, "bogus");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parse_does_not_trim() {
    assert!(" off ".parse::<ScanPolicy>().is_err());
}

#[test]
fn test_display_matches_name() {
    assert_eq!(ScanPolicy::GlobalIndex.to_string(), "GLOBAL_INDEX");
    assert_eq!(ScanPolicy::Off.to_string(), "OFF");
}

#[test]
fn test_scans_and_indexed_only() {
    assert!(!ScanPolicy::Off.scans());
    assert!(ScanPolicy::On.scans());
    assert!(ScanPolicy::Index.indexed_only());
    assert!(ScanPolicy::GlobalIndex.indexed_only());
    assert!(!ScanPolicy::Cache.indexed_only());
}

#[test]
fn test_policy_serialization() {
    let json = serde_json::to_string(&ScanPolicy::GlobalIndex).expect("serialization failed");
    assert_eq!(json, "\"GLOBAL_INDEX\"");
    let back: ScanPolicy = serde_json::from_str("\"CACHE\"").expect("deserialization failed");
    assert_eq!(back, ScanPolicy::Cache);
}
