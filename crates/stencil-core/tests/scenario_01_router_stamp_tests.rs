#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{device_engine, router, Device, Interface};
use std::sync::Arc;
use std::thread;
use stencil_core::{Container, Record, Template, TemplateEngine};

#[test]
fn test_router_stamps_back_to_equal_unsaved_graph() {
    // Given a saved router with two interfaces
    let engine = device_engine();
    let origin = router();
    let mut container = Container::labeled("router template");

    // When the container captures it and is stamped
    container.set_origin(&engine, &origin).unwrap();
    let copy: Device = container.stamp_as(&engine).unwrap();

    // Then the copy matches the origin on every declared field, in order
    assert_eq!(copy, origin.clone().unsaved());
    assert_eq!(copy.name, "router");
    assert_eq!(copy.model, "MX204");
    assert_eq!(copy.location, "rack 4");
    assert_eq!(copy.year, 2019);
    assert_eq!(
        copy.interfaces,
        vec![
            Interface::new("de0", "10.0.0.1", false),
            Interface::new("lo0", "127.0.0.1", true),
        ]
    );

    // And nothing in the copy is persisted
    assert!(!copy.is_persisted());
    assert!(copy.interfaces.iter().all(|i| i.id.is_none()));
    assert!(origin.is_persisted());
}

#[test]
fn test_container_records_tag_and_payload() {
    let engine = device_engine();
    let mut container = Container::new();

    container.set_origin(&engine, &router()).unwrap();

    assert_eq!(container.origin_type(), Some("Device"));
    let decoded = engine.codec().decode(container.template().unwrap()).unwrap();
    assert_eq!(decoded, Template::One(engine.as_template(&router()).unwrap()));
}

#[test]
fn test_stamp_is_repeatable_and_independent() {
    let engine = device_engine();
    let mut container = Container::new();
    container.set_origin(&engine, &router()).unwrap();
    let stored = container.clone();

    let mut first: Device = container.stamp_as(&engine).unwrap();
    let second: Device = container.stamp_as(&engine).unwrap();
    assert_eq!(first, second);

    first.interfaces[0].enabled = true;
    first.name = "router-2".into();
    assert_ne!(first, second);
    assert_eq!(second.name, "router");
    assert!(!second.interfaces[0].enabled);

    // Stamping never writes to the container
    assert_eq!(container, stored);
}

#[test]
fn test_stamp_survives_origin_removal() {
    let engine = device_engine();
    let mut container = Container::new();
    {
        let origin = router();
        container.set_origin(&engine, &origin).unwrap();
    }

    let copy: Device = container.stamp_as(&engine).unwrap();
    assert_eq!(copy.interfaces.len(), 2);
}

#[test]
fn test_set_origin_overwrites_previous_template() {
    let engine = device_engine();
    let mut container = Container::new();
    container.set_origin(&engine, &router()).unwrap();

    let switch = Device {
        name: "switch".into(),
        model: "EX4300".into(),
        location: "rack 7".into(),
        year: 2021,
        ..Device::default()
    };
    container.set_origin(&engine, &switch).unwrap();

    let copy: Device = container.stamp_as(&engine).unwrap();
    assert_eq!(copy, switch);
    assert!(copy.interfaces.is_empty());
}

#[test]
fn test_stamp_customize_runs_after_population() {
    let engine = device_engine();
    let mut container = Container::new();
    container.set_origin(&engine, &router()).unwrap();

    let mut interface_count_seen = None;
    let mut rename = |record: &mut dyn Record| {
        let device = record.downcast_mut::<Device>().unwrap();
        interface_count_seen = Some(device.interfaces.len());
        device.name = "router-copy".into();
    };
    let copy = container
        .stamp(&engine, Some(&mut rename))
        .unwrap()
        .downcast_one::<Device>()
        .unwrap();

    assert_eq!(interface_count_seen, Some(2));
    assert_eq!(copy.name, "router-copy");
    assert_eq!(copy.model, "MX204");
}

#[test]
fn test_engine_and_container_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TemplateEngine>();
    assert_send_sync::<Container>();
}

#[test]
fn test_concurrent_stamps_from_one_container() {
    // Given one populated container and a read-only engine shared by reference count
    let engine = Arc::new(device_engine());
    let mut container = Container::labeled("shared router");
    container.set_origin(&engine, &router()).unwrap();
    let container = Arc::new(container);
    let stored = (*container).clone();

    // When several threads stamp it at once
    let copies: Vec<Device> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let container = Arc::clone(&container);
                scope.spawn(move || container.stamp_as::<Device>(&engine).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Then every copy is the unsaved router and the container is unchanged
    assert_eq!(copies.len(), 8);
    assert!(copies.iter().all(|copy| *copy == router().unsaved()));
    assert_eq!(*container, stored);
}
