// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the events emitted with the `tracing` feature.
//!
//! Run with:
//!   cargo test -p understory_themeable --features tracing --test tracing

#![cfg(feature = "tracing")]

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use understory_context::{Component, ContextValue, Element, update};
use understory_themeable::{ThemeBundle, ThemeObject, Themeable, pack_theme_bundle};

/// One captured event: its message and its other fields, rendered.
#[derive(Debug, Clone, Default)]
struct CapturedEvent {
    message: String,
    fields: Vec<(String, String)>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Visit for CapturedEvent {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{value:?}");
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = CapturedEvent::default();
        event.record(&mut captured);
        self.events.lock().unwrap().push(captured);
    }
}

fn with_captured_events(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let capture = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture.events.lock().unwrap().clone()
}

fn messages(events: &[CapturedEvent], message: &str) -> Vec<CapturedEvent> {
    events
        .iter()
        .filter(|event| event.message == message)
        .cloned()
        .collect()
}

struct Button;

impl Component for Button {
    type Props = Option<ThemeObject>;
    type Instance = Element<Option<ThemeObject>>;

    fn display_name(&self) -> &str {
        "Button"
    }

    fn instantiate(&self, props: Self::Props, context: Option<ContextValue>) -> Self::Instance {
        Element::new(props, context)
    }
}

// A single test keeps every callsite registered under the scoped subscriber.
#[test]
fn lifecycle_events() {
    let events = with_captured_events(|| {
        let button = Themeable::new(Button);
        let red = ThemeObject::builder().set("color", "red").build();
        let bundle = ThemeBundle::builder().theme_for(&button, red).build();

        let mut instance = button.instantiate(None, Some(pack_theme_bundle(bundle)));
        let _ = instance.theme();
        let _ = instance.theme();

        let blue = ThemeObject::builder().set("color", "blue").build();
        update(&mut instance, Some(blue), None);
        let _ = instance.theme();
    });

    let minted = messages(&events, "minted theme key");
    assert_eq!(minted.len(), 1, "one key per wrap");
    assert!(minted[0].field("serial").is_some());

    let wrapped = messages(&events, "wrapped themeable component");
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0].field("component"), Some("Button"));

    let resolved = messages(&events, "resolved theme");
    assert_eq!(resolved.len(), 2, "cached reads do not resolve again");
    assert_eq!(resolved[0].field("source"), Some("Ambient"));
    assert_eq!(resolved[1].field("source"), Some("Explicit"));

    // The hook clears the cache; the commit that follows finds nothing cached.
    let invalidated = messages(&events, "invalidated theme");
    assert_eq!(invalidated.len(), 1);
    assert_eq!(invalidated[0].field("prop_changed"), Some("true"));
    assert_eq!(invalidated[0].field("ambient_changed"), Some("true"));
}
