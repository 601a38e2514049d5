//! Unit tests for the component registry and the fail-fast cleared policy

use std::sync::Arc;
use std::thread;

use bootwire_application::{ComponentRegistry, DefaultResolver, GraphResolver, Instance, module_fn};
use bootwire_domain::{Error, Key};

fn instance(value: u32) -> Instance {
    Arc::new(Arc::new(value))
}

#[test]
fn test_insert_if_absent_keeps_first() {
    let registry = ComponentRegistry::new();
    let key = Key::of::<u32>();

    let first = registry.insert_if_absent(key.clone(), instance(1)).expect("insert");
    let second = registry.insert_if_absent(key.clone(), instance(2)).expect("insert");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(&key));
    assert_eq!(registry.keys(), vec![key]);
}

#[test]
fn test_clear_is_idempotent() {
    let registry = ComponentRegistry::new();
    registry.insert_if_absent(Key::of::<u32>(), instance(1)).expect("insert");

    assert!(!registry.is_cleared());
    assert_eq!(registry.clear(), 1);
    assert!(registry.is_cleared());
    assert!(registry.is_empty());
    assert_eq!(registry.clear(), 0);
    assert!(registry.is_cleared());
}

#[test]
fn test_insert_after_clear_fails() {
    let registry = ComponentRegistry::new();
    registry.clear();

    let err = registry
        .insert_if_absent(Key::of::<u32>(), instance(1))
        .expect_err("cleared");
    assert!(matches!(err, Error::RegistryCleared { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_lookups_fail_fast_after_clear() {
    let module = module_fn("app", |binder| {
        binder.bind::<u32>().to_value(1);
        binder.bind::<String>().to_singleton(|_| Ok(Arc::new("s".to_string())));
        binder.bind::<Vec<u8>>().to_provider(|_| Ok(Arc::new(Vec::new())));
        Ok(())
    });
    let injector = DefaultResolver.create_injector(&[&module]).expect("graph");
    injector.get::<String>().expect("before clear");

    injector.registry().clear();

    assert!(matches!(injector.get::<u32>(), Err(Error::RegistryCleared { .. })));
    assert!(matches!(injector.get::<String>(), Err(Error::RegistryCleared { .. })));
    assert!(matches!(injector.get::<Vec<u8>>(), Err(Error::RegistryCleared { .. })));
    assert!(matches!(injector.try_get::<u64>(), Err(Error::RegistryCleared { .. })));
}

#[test]
fn test_concurrent_clear_and_reads() {
    let module = module_fn("app", |binder| {
        binder.bind::<String>().to_singleton(|_| Ok(Arc::new("s".to_string())));
        Ok(())
    });
    let injector = DefaultResolver.create_injector(&[&module]).expect("graph");

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let injector = injector.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    match injector.get::<String>() {
                        Ok(value) => assert_eq!(*value, "s"),
                        Err(Error::RegistryCleared { .. }) => {}
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
            })
        })
        .collect();

    let clearers: Vec<_> = (0..2)
        .map(|_| {
            let registry = Arc::clone(injector.registry());
            thread::spawn(move || registry.clear())
        })
        .collect();

    for reader in readers {
        reader.join().expect("reader thread");
    }
    for clearer in clearers {
        clearer.join().expect("clear thread");
    }

    assert!(injector.registry().is_cleared());
    assert!(injector.registry().is_empty());
    assert!(matches!(injector.get::<String>(), Err(Error::RegistryCleared { .. })));
}
