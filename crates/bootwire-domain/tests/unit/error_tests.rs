//! Unit tests for the error taxonomy

use bootwire_domain::{Diagnostic, Error};

#[test]
fn test_invalid_configuration_message_names_value() {
    let err = Error::invalid_configuration("scanning", "bogus");
    let message = err.to_string();
    assert!(message.contains("bogus"));
    assert!(message.contains("scanning"));
}

#[test]
fn test_graph_resolution_lists_every_diagnostic() {
    let err = Error::graph_resolution(vec![
        Diagnostic::Missing {
            key: "app::Db".to_string(),
            required_by: Some("AppModule".to_string()),
        },
        Diagnostic::Cyclic {
            path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        },
    ]);

    let message = err.to_string();
    assert!(message.contains("no binding for app::Db (required by AppModule)"));
    assert!(message.contains("dependency cycle A -> B -> A"));
    assert_eq!(err.diagnostics().map(|d| d.len()), Some(2));
}

#[test]
fn test_ambiguous_diagnostic_display() {
    let diagnostic = Diagnostic::Ambiguous {
        key: "u32".to_string(),
        sources: vec!["First".to_string(), "Second".to_string()],
    };
    assert_eq!(
        diagnostic.to_string(),
        "ambiguous bindings for u32 from [First, Second]"
    );
}

#[test]
fn test_registry_cleared_message() {
    let err = Error::registry_cleared("app::Service");
    assert!(err.to_string().contains("app::Service"));
    assert!(err.diagnostics().is_none());
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = io.into();
    assert!(matches!(err, Error::Io { .. }));
}
