//! Trigger zone integration tests.
//!
//! These tests verify the adapter's boundary contract with the dispatch
//! core: the fire-once latch is adapter state, conditions are picked by
//! name from the condition registry, the local gate runs before the
//! pre-dispatch callback, and misconfiguration degrades to a skipped
//! raise rather than a crash.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use stagecue::{
    Condition, ConditionRegistry, EntityHandle, EventCategory, EventRegistry, Listener,
    TriggerDirection, TriggerZone, TriggerZoneConfig,
};

fn counting_listener() -> (Listener, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let captured = Rc::clone(&count);
    let listener: Listener = Rc::new(move |_event| {
        captured.set(captured.get() + 1);
        Ok(())
    });
    (listener, count)
}

#[test]
fn test_zone_raises_through_registry() {
    let events = EventRegistry::new();
    let conditions = ConditionRegistry::new();
    let zone_entity: EntityHandle = Rc::new("bridge-zone");
    let (listener, count) = counting_listener();

    events.subscribe("cutscene.bridge", &listener, &zone_entity);

    let config = TriggerZoneConfig::new("cutscene.bridge", EventCategory::Cutscene)
        .with_detail("CutsceneID", "bridge_collapse");
    let mut zone = TriggerZone::new(config);

    let outcome = zone.on_enter(&events, &conditions, &zone_entity).unwrap();
    assert_eq!(outcome.delivered(), 1);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_fire_once_is_per_direction_and_per_instance() {
    let events = EventRegistry::new();
    let conditions = ConditionRegistry::new();
    let zone_entity: EntityHandle = Rc::new("bridge-zone");
    let (listener, count) = counting_listener();

    events.subscribe("ambush", &listener, &zone_entity);

    let config = TriggerZoneConfig::new("ambush", EventCategory::Battle).fire_once();
    let mut first = TriggerZone::new(config.clone());
    let mut second = TriggerZone::new(config);

    first.on_enter(&events, &conditions, &zone_entity);
    first.on_enter(&events, &conditions, &zone_entity);
    first.on_exit(&events, &conditions, &zone_entity);
    assert_eq!(count.get(), 2); // one enter, one exit

    // A second instance owns its own latches.
    second.on_enter(&events, &conditions, &zone_entity);
    assert_eq!(count.get(), 3);
}

#[test]
fn test_condition_gate_checked_before_pre_dispatch() {
    let events = EventRegistry::new();
    let zone_entity: EntityHandle = Rc::new("vault-zone");

    let unlocked = Rc::new(Cell::new(false));
    let gate = Rc::clone(&unlocked);
    let mut conditions = ConditionRegistry::new();
    conditions.register("vault_unlocked", move || {
        let state = Rc::clone(&gate);
        Condition::new("vault_unlocked", move || state.get())
    });

    let callback_ran = Rc::new(Cell::new(false));
    let flagged = Rc::clone(&callback_ran);
    let config = TriggerZoneConfig::new("vault.opened", EventCategory::Interactable)
        .fire_once()
        .with_condition("vault_unlocked");
    let mut zone = TriggerZone::new(config)
        .with_pre_dispatch(move |_direction, _record| flagged.set(true));

    // Gated: no pre-dispatch, no latch.
    assert!(zone.on_enter(&events, &conditions, &zone_entity).is_none());
    assert!(!callback_ran.get());
    assert!(!zone.has_fired(TriggerDirection::Enter));

    // A gated fire-once zone still fires later, when its condition holds.
    unlocked.set(true);
    assert!(zone.on_enter(&events, &conditions, &zone_entity).is_some());
    assert!(callback_ran.get());
    assert!(zone.has_fired(TriggerDirection::Enter));
}

#[test]
fn test_pre_dispatch_runs_before_listeners() {
    let events = EventRegistry::new();
    let conditions = ConditionRegistry::new();
    let zone_entity: EntityHandle = Rc::new("patrol-zone");

    let order = Rc::new(RefCell::new(Vec::new()));

    let listener_log = Rc::clone(&order);
    let listener: Listener = Rc::new(move |_event| {
        listener_log.borrow_mut().push("listener");
        Ok(())
    });
    events.subscribe("patrol", &listener, &zone_entity);

    let callback_log = Rc::clone(&order);
    let config = TriggerZoneConfig::new("patrol", EventCategory::Custom);
    let mut zone = TriggerZone::new(config)
        .with_pre_dispatch(move |_direction, _record| callback_log.borrow_mut().push("callback"));

    zone.on_enter(&events, &conditions, &zone_entity);
    assert_eq!(*order.borrow(), vec!["callback", "listener"]);
}

#[test]
fn test_zone_seeds_metadata_and_originator() {
    let events = EventRegistry::new();
    let conditions = ConditionRegistry::new();
    let zone_entity: EntityHandle = Rc::new("lever-zone");

    let observed = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&observed);
    let zone_weak = Rc::downgrade(&zone_entity);
    let listener: Listener = Rc::new(move |event| {
        let originator_is_zone = event
            .originator()
            .is_some_and(|originator| Rc::ptr_eq(&originator, &zone_weak.upgrade().unwrap()));
        *sink.borrow_mut() = Some((
            event.metadata().get_text("InteractionID").map(String::from),
            event.metadata().get_text("Direction").map(String::from),
            originator_is_zone,
        ));
        Ok(())
    });
    events.subscribe("interact.lever", &listener, &zone_entity);

    let config = TriggerZoneConfig::new("interact.lever", EventCategory::Interactable)
        .with_detail("InteractionID", "lever_03")
        .require_detail("InteractionID");
    let mut zone = TriggerZone::new(config);

    zone.on_exit(&events, &conditions, &zone_entity);

    assert_eq!(
        *observed.borrow(),
        Some((
            Some("lever_03".to_string()),
            Some("Exit".to_string()),
            true
        ))
    );
}

#[test]
fn test_misconfigured_zone_degrades_silently() {
    let events = EventRegistry::new();
    let conditions = ConditionRegistry::new();
    let zone_entity: EntityHandle = Rc::new("broken-zone");
    let (listener, count) = counting_listener();

    events.subscribe("broken", &listener, &zone_entity);

    // Unknown condition name: skipped, nothing raised, latch untouched.
    let config = TriggerZoneConfig::new("broken", EventCategory::Custom)
        .fire_once()
        .with_condition("not_registered");
    let mut zone = TriggerZone::new(config);
    assert!(zone.on_enter(&events, &conditions, &zone_entity).is_none());

    // Required detail never seeded: same degradation.
    let config = TriggerZoneConfig::new("broken", EventCategory::Custom)
        .require_detail("InteractionID");
    let mut zone = TriggerZone::new(config);
    assert!(zone.on_enter(&events, &conditions, &zone_entity).is_none());

    assert_eq!(count.get(), 0);
}
