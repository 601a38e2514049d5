//! Unit tests for module composition and the precedence rule

use bootwire_application::{
    DefaultResolver, GraphResolver, Module, Origin, WireModule, module_fn,
};
use bootwire_domain::{Diagnostic, Error};

fn value_module(name: &'static str, value: u32) -> Box<dyn Module> {
    Box::new(module_fn(name, move |binder| {
        binder.bind::<u32>().to_value(value);
        Ok(())
    }))
}

fn override_module(name: &'static str, value: u32) -> Box<dyn Module> {
    Box::new(module_fn(name, move |binder| {
        binder.bind::<u32>().overriding().to_value(value);
        Ok(())
    }))
}

fn boxed(module: impl Module + 'static) -> Box<dyn Module> {
    Box::new(module)
}

fn resolve(wire: &WireModule) -> bootwire_domain::Result<u32> {
    let injector = DefaultResolver.create_injector(&[wire])?;
    Ok(*injector.get::<u32>()?)
}

#[test]
fn test_contributions_keep_order_and_origin() {
    let wire = WireModule::new(vec![value_module("a", 1), value_module("b", 2)])
        .with_discovered(boxed(module_fn("scan", |_| Ok(()))));

    assert_eq!(wire.len(), 3);
    assert_eq!(
        wire.contributions(),
        vec![
            ("a".to_string(), Origin::Explicit),
            ("b".to_string(), Origin::Explicit),
            ("scan".to_string(), Origin::Discovered),
        ]
    );
}

#[test]
fn test_empty_composite_is_valid() {
    let wire = WireModule::new(Vec::new());
    assert!(wire.is_empty());
    let merged = wire.merge().expect("merge");
    assert!(merged.bindings().is_empty());
}

#[test]
fn test_earlier_declaration_wins() {
    let wire = WireModule::new(vec![value_module("first", 1), value_module("second", 2)]);
    assert_eq!(resolve(&wire).expect("resolve"), 1);
}

#[test]
fn test_explicit_beats_discovered() {
    let wire = WireModule::new(vec![value_module("explicit", 1)]).with_discovered(value_module("scan", 2));
    assert_eq!(resolve(&wire).expect("resolve"), 1);
}

#[test]
fn test_override_replaces_earlier_binding() {
    let wire = WireModule::new(vec![value_module("base", 1), override_module("patch", 2)]);
    assert_eq!(resolve(&wire).expect("resolve"), 2);

    let merged = wire.merge().expect("merge");
    assert_eq!(merged.bindings().len(), 1);
    assert_eq!(merged.bindings()[0].source(), "patch");
}

#[test]
fn test_override_beats_later_plain_binding() {
    let wire = WireModule::new(vec![override_module("patch", 2), value_module("late", 3)]);
    assert_eq!(resolve(&wire).expect("resolve"), 2);
}

#[test]
fn test_discovered_override_wins() {
    let wire = WireModule::new(vec![value_module("explicit", 1)]).with_discovered(override_module("scan", 9));
    assert_eq!(resolve(&wire).expect("resolve"), 9);
}

#[test]
fn test_two_overrides_are_ambiguous() {
    let wire = WireModule::new(vec![override_module("a", 1), override_module("b", 2)]);
    let err = wire.merge().expect_err("should be ambiguous");

    let diagnostics = err.diagnostics().expect("graph resolution error");
    assert_eq!(diagnostics.len(), 1);
    match diagnostics.iter().next() {
        Some(Diagnostic::Ambiguous { sources, .. }) => {
            assert_eq!(sources, &vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
}

#[test]
fn test_duplicate_inside_one_module_is_ambiguous() {
    let wire = WireModule::new(vec![boxed(module_fn("dup", |binder| {
        binder.bind::<u32>().to_value(1);
        binder.bind::<u32>().to_value(2);
        Ok(())
    }))]);

    let err = wire.merge().expect_err("should be ambiguous");
    assert!(matches!(err, Error::GraphResolution { .. }));
}

#[test]
fn test_duplicate_inside_later_module_is_ambiguous() {
    let second = boxed(module_fn("second", |binder| {
        binder.bind::<u32>().to_value(2);
        binder.bind::<u32>().to_value(3);
        Ok(())
    }));
    let wire = WireModule::new(vec![value_module("first", 1), second]);

    let err = wire.merge().expect_err("should be ambiguous");
    match err.diagnostics().and_then(|d| d.iter().next()) {
        Some(Diagnostic::Ambiguous { key, sources }) => {
            assert_eq!(key, "u32");
            assert_eq!(sources, &vec!["second".to_string(), "second".to_string()]);
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
}

#[test]
fn test_configure_error_propagates() {
    let wire = WireModule::new(vec![boxed(module_fn("broken", |_| {
        Err(Error::lifecycle("broken module"))
    }))]);

    let err = wire.merge().expect_err("configure fails");
    assert!(matches!(err, Error::Lifecycle { .. }));
}

#[test]
fn test_nested_composite_installs_merged_bindings() {
    let inner = WireModule::new(vec![value_module("inner", 4)]);
    let outer = WireModule::new(vec![boxed(inner), value_module("outer", 5)]);

    let injector = DefaultResolver.create_injector(&[&outer]).expect("resolve");
    assert_eq!(*injector.get::<u32>().expect("u32"), 4);
}

#[test]
fn test_requirements_survive_merge() {
    let consumer = module_fn("consumer", |binder| {
        binder.require::<String>();
        Ok(())
    });
    let wire = WireModule::new(vec![boxed(consumer)]);
    let merged = wire.merge().expect("merge");
    assert_eq!(merged.requirements().len(), 1);
    assert_eq!(merged.requirements()[0].source, "consumer");
}
