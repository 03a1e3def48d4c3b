//! Integration tests for named-event resolution
//!
//! Tests cover:
//! - Override precedence through the chain
//! - Static events registering globally on first resolution
//! - Deduplicated global registration
//! - Teardown releasing registrations

use super::test_utils::sim_directory;
use copse::events::{MethodDesc, OverrideChain};

fn guard_chain() -> OverrideChain {
    // Guard derives from Npc and redefines "alert".
    OverrideChain::from_base_to_derived([
        MethodDesc::event("alert", "Npc"),
        MethodDesc::event("patrol", "Npc"),
        MethodDesc::static_event("muster", "Npc"),
        MethodDesc::event("alert", "Guard"),
    ])
}

#[test]
fn test_derived_override_wins() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    let context = directory.get_or_create(0);
    let resolved = context.find_named_event(&chain, "alert").unwrap();

    assert_eq!(resolved.class_name(), "Guard");
    assert_eq!(resolved.name(), "alert");
}

#[test]
fn test_base_event_resolves_when_not_overridden() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    let context = directory.get_or_create(0);
    let resolved = context.find_named_event(&chain, "patrol").unwrap();
    assert_eq!(resolved.class_name(), "Npc");
}

#[test]
fn test_unknown_event_misses() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    let context = directory.get_or_create(0);
    assert!(context.find_named_event(&chain, "vanish").is_none());
    // Case matters.
    assert!(context.find_named_event(&chain, "Alert").is_none());
}

#[test]
fn test_static_event_registers_for_declaring_class() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    let context = directory.get_or_create(0);
    assert!(context.find_event_static("Npc", "muster").is_none());

    context.find_named_event(&chain, "muster").unwrap();

    let registered = context.find_event_static("Npc", "muster").unwrap();
    assert_eq!(registered.name(), "muster");
    assert!(registered.is_static());
}

#[test]
fn test_instance_event_stays_out_of_static_table() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    let context = directory.get_or_create(0);
    context.find_named_event(&chain, "alert").unwrap();

    assert!(context.find_event_static("Guard", "alert").is_none());
    assert!(context.find_event_static("Npc", "alert").is_none());
}

#[test]
fn test_repeated_resolution_registers_once() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    let context = directory.get_or_create(0);
    context.find_named_event(&chain, "muster").unwrap();
    context.find_named_event(&chain, "muster").unwrap();

    assert_eq!(context.static_events().len(), 1);
}

#[test]
fn test_manual_global_registration_deduplicates() {
    let (mut directory, _factory) = sim_directory();
    let muster = MethodDesc::static_event("muster", "Npc");

    let context = directory.get_or_create(0);
    assert!(context.insert_event_global("Npc", &muster));
    assert!(!context.insert_event_global("Npc", &muster));

    // The same event name under another class is a distinct entry.
    assert!(context.insert_event_global("Guard", &muster));
    assert_eq!(context.static_events().len(), 2);
}

#[test]
fn test_event_registrations_are_context_scoped() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    directory.get_or_create(0).find_named_event(&chain, "muster").unwrap();

    let other = directory.get_or_create(1);
    assert!(other.find_event_static("Npc", "muster").is_none());
}

#[test]
fn test_destroy_releases_event_registrations() {
    let (mut directory, _factory) = sim_directory();
    let chain = guard_chain();

    directory.get_or_create(0).find_named_event(&chain, "muster").unwrap();
    directory.destroy(0).unwrap();

    let fresh = directory.get_or_create(0);
    assert!(fresh.find_event_static("Npc", "muster").is_none());
}
