//! Integration tests for shared-directory access
//!
//! The directory itself is single-writer; hosts share it behind a lock.
//! These tests exercise the intended `parking_lot::RwLock` wrapping under
//! real thread contention.

use super::test_utils::{sim_directory, SimAgent};
use copse::context::{ContextDirectory, ContextId};
use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn shared_directory() -> Arc<RwLock<ContextDirectory>> {
    let (directory, _factory) = sim_directory();
    Arc::new(RwLock::new(directory))
}

#[test]
fn test_concurrent_creation_of_distinct_contexts() {
    let directory = shared_directory();

    let handles: Vec<_> = (0..8u32)
        .map(|id| {
            let directory = Arc::clone(&directory);
            thread::spawn(move || {
                let mut guard = directory.write();
                guard
                    .get_or_create(id)
                    .statics_mut()
                    .set("Npc", "worker", json!(id));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let guard = directory.read();
    assert_eq!(guard.len(), 8);
    for id in 0..8u32 {
        assert_eq!(
            guard.get(id).unwrap().statics().get("Npc", "worker"),
            Some(&json!(id))
        );
    }
}

#[test]
fn test_concurrent_get_or_create_same_id_is_single_context() {
    let directory = shared_directory();

    let handles: Vec<_> = (0..8u32)
        .map(|_| {
            let directory = Arc::clone(&directory);
            thread::spawn(move || {
                directory.write().get_or_create(0).id()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }

    assert_eq!(directory.read().len(), 1);
}

#[test]
fn test_parallel_readers_see_bound_instance() {
    let directory = shared_directory();
    let hero = SimAgent::new(&["Npc", "Hero"]);
    directory.write().get_or_create(0).bind_instance("hero", &hero).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let directory = Arc::clone(&directory);
            thread::spawn(move || {
                let guard = directory.read();
                let agent = guard.get(0).unwrap().get_instance("hero").unwrap();
                agent.is_a("Hero")
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_interleaved_create_and_destroy() {
    let directory = shared_directory();

    let creators: Vec<_> = (0..4u32)
        .map(|id| {
            let directory = Arc::clone(&directory);
            thread::spawn(move || {
                directory.write().get_or_create(id);
                directory.write().destroy(id).unwrap();
            })
        })
        .collect();

    for handle in creators {
        handle.join().unwrap();
    }

    assert!(directory.read().is_empty());
}

#[test]
fn test_context_ids_are_plain_integers() {
    // Hosts derive ids however they like; the directory only needs Eq.
    let directory = shared_directory();
    let mut guard = directory.write();
    guard.get_or_create(ContextId::MAX);
    guard.get_or_create(ContextId::MIN);
    assert_eq!(guard.ids(), vec![ContextId::MIN, ContextId::MAX]);
}
