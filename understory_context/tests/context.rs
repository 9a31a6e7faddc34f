// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_context` crate.
//!
//! These walk a small component tree the way a host would, checking what each
//! component sees and that the pre-update hook observes old and new inputs in
//! the right order.

use understory_context::{
    Component, ComponentInstance, ContextKey, ContextRequirements, ContextStack, ContextValue,
    Element, mount, rerender,
};

const LOCALE: ContextKey = ContextKey::new("@@tests/locale");
const DENSITY: ContextKey = ContextKey::new("@@tests/density");

/// Records the locale it saw before and after every update.
struct LocaleLabel;

struct LocaleLabelInstance {
    element: Element<()>,
    transitions: Vec<(Option<&'static str>, Option<&'static str>)>,
}

fn locale_of(context: Option<&ContextValue>) -> Option<&'static str> {
    context.and_then(|cx| cx.get::<&'static str>(LOCALE)).copied()
}

impl Component for LocaleLabel {
    type Props = ();
    type Instance = LocaleLabelInstance;

    fn display_name(&self) -> &str {
        "LocaleLabel"
    }

    fn context_requirements(&self) -> ContextRequirements {
        ContextRequirements::new().with(LOCALE)
    }

    fn instantiate(&self, props: (), context: Option<ContextValue>) -> LocaleLabelInstance {
        LocaleLabelInstance {
            element: Element::new(props, context),
            transitions: Vec::new(),
        }
    }
}

impl ComponentInstance for LocaleLabelInstance {
    type Props = ();

    fn props(&self) -> &() {
        self.element.props()
    }

    fn context(&self) -> Option<&ContextValue> {
        self.element.context()
    }

    fn will_update(&mut self, _next_props: &(), next_context: Option<&ContextValue>) {
        let transition = (locale_of(self.context()), locale_of(next_context));
        self.transitions.push(transition);
    }

    fn commit(&mut self, props: (), context: Option<ContextValue>) {
        self.element.commit(props, context);
    }
}

#[test]
fn components_see_the_nearest_provider() {
    let mut stack = ContextStack::new();
    let at_root = mount(&LocaleLabel, (), &stack);

    stack.push(ContextValue::new().with(LOCALE, "en").with(DENSITY, 1_u8));
    let outer = mount(&LocaleLabel, (), &stack);

    let inner = stack.provide(ContextValue::new().with(LOCALE, "de"), |stack| {
        mount(&LocaleLabel, (), stack)
    });

    assert_eq!(locale_of(at_root.context()), None);
    assert_eq!(locale_of(outer.context()), Some("en"));
    assert_eq!(locale_of(inner.context()), Some("de"));

    // Density was never declared, so it is filtered out.
    assert!(!outer.context().unwrap().contains(DENSITY));
}

#[test]
fn hook_sees_old_then_new_context() {
    let mut stack = ContextStack::new();
    stack.push(ContextValue::new().with(LOCALE, "en"));
    let mut label = mount(&LocaleLabel, (), &stack);

    stack.pop();
    stack.push(ContextValue::new().with(LOCALE, "fr"));
    rerender(&LocaleLabel, &mut label, (), &stack);

    stack.pop();
    rerender(&LocaleLabel, &mut label, (), &stack);

    assert_eq!(
        label.transitions,
        [(Some("en"), Some("fr")), (Some("fr"), None)]
    );
    assert!(label.context().is_none());
}

#[test]
fn unchanged_entries_keep_identity_across_rerenders() {
    let shared = ContextValue::new().with(LOCALE, "en");
    let mut stack = ContextStack::new();
    stack.push(shared.clone());
    let mut label = mount(&LocaleLabel, (), &stack);
    let before = label.context().cloned();

    stack.push(ContextValue::new().with(DENSITY, 2_u8));
    rerender(&LocaleLabel, &mut label, (), &stack);

    assert!(ContextValue::entry_ptr_eq(
        before.as_ref(),
        label.context(),
        LOCALE
    ));
}
