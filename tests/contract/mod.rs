use super::*;
use lazy_inject::Resolver;
use std::sync::{Arc, Mutex};

#[test]
fn should_resolve_key_through_resolver() {
    let view = param(|key: &str| key.len());

    assert_eq!(3, view.get("abc"));
}

#[test]
fn should_return_memoized_value_without_resolving_again() {
    let sentinel = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&sentinel);

    let view = param(move |key: &str| {
        *counter.lock().unwrap() += 1;
        key.len()
    });

    assert_eq!(3, view.get("abc"));
    assert_eq!(3, view.get("abc"));
    assert_eq!(1, *sentinel.lock().unwrap());
}

#[test]
fn should_memoize_even_when_resolver_output_changes() {
    let seed = Arc::new(Mutex::new(42));
    let source = Arc::clone(&seed);

    let view = param(move |_key: &str| *source.lock().unwrap());

    assert_eq!(42, view.get("value"));
    *seed.lock().unwrap() = 43;
    assert_eq!(42, view.get("value"));
}

#[test]
fn should_resolve_each_key_once() {
    let sentinel = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&sentinel);

    let view = param(move |_key: &str| {
        let mut calls = counter.lock().unwrap();
        *calls += 1;
        *calls
    });

    assert_eq!(1, view.get("prop1"));
    assert_eq!(2, view.get("prop2"));
    assert_eq!(1, view.get("prop1"));
    assert_eq!(2, *sentinel.lock().unwrap());
}

#[test]
fn uncached_should_resolve_every_read() {
    let sentinel = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&sentinel);

    let view = uncached(move |_key: &str| {
        let mut calls = counter.lock().unwrap();
        *calls += 1;
        *calls
    });

    assert_eq!(1, view.get("prop1"));
    assert_eq!(2, view.get("prop2"));
    assert_eq!(3, view.get("prop1"));
    assert_eq!(3, *sentinel.lock().unwrap());
}

#[test]
fn should_memoize_none_like_values() {
    let sentinel = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&sentinel);

    let view = param(move |_key: &str| -> Option<usize> {
        *counter.lock().unwrap() += 1;
        None
    });

    assert_eq!(None, view.get("missing"));
    assert_eq!(None, view.get("missing"));
    assert_eq!(1, *sentinel.lock().unwrap());
}

#[test]
fn insert_should_override_memoized_value() {
    let view = param(|key: &str| key.len());

    assert_eq!(3, view.get("abc"));
    view.insert("abc", 99);
    assert_eq!(99, view.get("abc"));
}

#[test]
fn insert_should_shadow_resolver_on_uncached_view() {
    let sentinel = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&sentinel);

    let view = uncached(move |key: &str| {
        *counter.lock().unwrap() += 1;
        key.len()
    });

    view.insert("abc", 99);
    assert_eq!(99, view.get("abc"));
    assert_eq!(0, *sentinel.lock().unwrap());
}

#[test]
fn should_enumerate_stored_keys() {
    let view = param(|key: &str| key.len());

    assert!(view.keys().is_empty());
    view.get("abc");
    view.get("de");
    view.insert("fixed", 0);

    let mut keys = view.keys();
    keys.sort();
    assert_eq!(vec!["abc", "de", "fixed"], keys);
    assert!(view.is_resolved("abc"));
    assert!(!view.is_resolved("unseen"));
}

#[test]
fn uncached_should_not_grow_the_store() {
    let view = uncached(|key: &str| key.len());

    view.get("abc");
    view.get("abc");

    assert!(view.keys().is_empty());
    assert!(!view.is_resolved("abc"));
}

#[test]
#[should_panic(expected = "no such dependency")]
fn resolver_panics_should_propagate() {
    let view = param(|key: &str| -> usize { panic!("no such dependency: {key}") });

    view.get("ghost");
}

#[test]
fn use_resolver_trait() {
    struct ByLen;

    impl Resolver for ByLen {
        type Output = usize;

        fn resolve(&mut self, key: &str) -> usize {
            key.len()
        }
    }

    let view = param(ByLen);

    assert_eq!(4, view.get("four"));
}

#[test]
fn use_function_as_resolver() {
    fn by_len(key: &str) -> usize {
        key.len()
    }

    let view = param(by_len);

    assert_eq!(2, view.get("it"));
}
