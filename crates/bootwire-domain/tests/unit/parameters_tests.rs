//! Unit tests for the invocation-arguments value

use bootwire_domain::Parameters;

#[test]
fn test_parameters_keep_invocation_order() {
    let params = Parameters::new(["--x", "-v", "file"]);

    assert_eq!(params.len(), 3);
    assert!(!params.is_empty());
    assert_eq!(params.as_slice(), ["--x", "-v", "file"]);
    let collected: Vec<&str> = params.iter().map(String::as_str).collect();
    assert_eq!(collected, vec!["--x", "-v", "file"]);
}

#[test]
fn test_parameters_clone_is_independent() {
    let original = Parameters::from(vec!["--x".to_string()]);
    let mut copy = original.clone().into_vec();
    copy.push("--y".to_string());

    assert_eq!(original.as_slice(), ["--x"]);
    assert_eq!(copy, vec!["--x".to_string(), "--y".to_string()]);
}

#[test]
fn test_empty_parameters() {
    let params = Parameters::default();
    assert!(params.is_empty());
    assert_eq!(params, Parameters::new(Vec::<String>::new()));
    assert_eq!((&params).into_iter().count(), 0);
}
