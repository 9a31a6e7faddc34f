// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component lifecycle contract.
//!
//! A host drives components through two calls: [`mount`] creates an instance
//! from a definition, and [`update`] (or [`rerender`]) hands an existing
//! instance its next inputs. `update` always fires
//! [`ComponentInstance::will_update`] with the incoming inputs while the
//! current ones are still in place, then commits.

use crate::requirements::ContextRequirements;
use crate::stack::ContextStack;
use crate::value::ContextValue;

/// A component definition.
///
/// Definitions are values rather than types, so a wrapper can produce a new
/// definition at runtime (see `understory_themeable::Themeable`).
pub trait Component {
    /// The configuration inputs an instance is created and updated with.
    type Props;
    /// The live instance type.
    type Instance: ComponentInstance<Props = Self::Props>;

    /// The name used in debug output and diagnostics.
    fn display_name(&self) -> &str;

    /// The context channels instances of this component read.
    fn context_requirements(&self) -> ContextRequirements {
        ContextRequirements::new()
    }

    /// Creates an instance from its initial inputs.
    ///
    /// `context` is `None` when no provider is in scope.
    fn instantiate(&self, props: Self::Props, context: Option<ContextValue>) -> Self::Instance;
}

/// A live component instance.
pub trait ComponentInstance {
    /// The configuration inputs.
    type Props;

    /// The current props.
    fn props(&self) -> &Self::Props;

    /// The current context, as selected for this component's requirements.
    fn context(&self) -> Option<&ContextValue>;

    /// Called before new inputs replace the current ones.
    ///
    /// [`props`](Self::props) and [`context`](Self::context) still return the
    /// current inputs during this call.
    fn will_update(&mut self, _next_props: &Self::Props, _next_context: Option<&ContextValue>) {}

    /// Replaces the current inputs.
    ///
    /// Hosts should go through [`update`] rather than call this directly, so
    /// that [`will_update`](Self::will_update) is never skipped.
    fn commit(&mut self, props: Self::Props, context: Option<ContextValue>);
}

/// Creates an instance of `component` at the stack's current position.
pub fn mount<C: Component>(component: &C, props: C::Props, stack: &ContextStack) -> C::Instance {
    let context = stack.scoped_for(&component.context_requirements());
    component.instantiate(props, context)
}

/// Hands `instance` its next inputs.
pub fn update<I: ComponentInstance>(
    instance: &mut I,
    props: I::Props,
    context: Option<ContextValue>,
) {
    instance.will_update(&props, context.as_ref());
    instance.commit(props, context);
}

/// Re-renders `instance` of `component` at the stack's current position.
pub fn rerender<C: Component>(
    component: &C,
    instance: &mut C::Instance,
    props: C::Props,
    stack: &ContextStack,
) {
    let context = stack.scoped_for(&component.context_requirements());
    update(instance, props, context);
}

/// A component instance that only holds its current inputs.
///
/// Useful as the instance type of simple components, and as the innermost
/// layer under wrappers.
#[derive(Clone, Debug)]
pub struct Element<P> {
    props: P,
    context: Option<ContextValue>,
}

impl<P> Element<P> {
    /// Creates an element from its initial inputs.
    #[must_use]
    pub fn new(props: P, context: Option<ContextValue>) -> Self {
        Self { props, context }
    }
}

impl<P> ComponentInstance for Element<P> {
    type Props = P;

    fn props(&self) -> &P {
        &self.props
    }

    fn context(&self) -> Option<&ContextValue> {
        self.context.as_ref()
    }

    fn commit(&mut self, props: P, context: Option<ContextValue>) {
        self.props = props;
        self.context = context;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContextKey;
    use alloc::vec::Vec;

    const LOCALE: ContextKey = ContextKey::new("@@test/locale");
    const OTHER: ContextKey = ContextKey::new("@@test/other");

    struct Label;

    struct LabelInstance {
        element: Element<u32>,
        /// (current props, incoming props) seen by each hook call.
        hook_calls: Vec<(u32, u32)>,
    }

    impl Component for Label {
        type Props = u32;
        type Instance = LabelInstance;

        fn display_name(&self) -> &str {
            "Label"
        }

        fn context_requirements(&self) -> ContextRequirements {
            ContextRequirements::new().with(LOCALE)
        }

        fn instantiate(&self, props: u32, context: Option<ContextValue>) -> LabelInstance {
            LabelInstance {
                element: Element::new(props, context),
                hook_calls: Vec::new(),
            }
        }
    }

    impl ComponentInstance for LabelInstance {
        type Props = u32;

        fn props(&self) -> &u32 {
            self.element.props()
        }

        fn context(&self) -> Option<&ContextValue> {
            self.element.context()
        }

        fn will_update(&mut self, next_props: &u32, _next_context: Option<&ContextValue>) {
            let current = *self.props();
            self.hook_calls.push((current, *next_props));
        }

        fn commit(&mut self, props: u32, context: Option<ContextValue>) {
            self.element.commit(props, context);
        }
    }

    #[test]
    fn mount_selects_declared_context() {
        let mut stack = ContextStack::new();
        stack.push(ContextValue::new().with(LOCALE, "en").with(OTHER, 1_u8));

        let instance = mount(&Label, 1, &stack);
        let cx = instance.context().unwrap();
        assert!(cx.contains(LOCALE));
        assert!(!cx.contains(OTHER));
    }

    #[test]
    fn mount_at_root_has_no_context() {
        let instance = mount(&Label, 1, &ContextStack::new());
        assert!(instance.context().is_none());
    }

    #[test]
    fn update_fires_hook_before_commit() {
        let stack = ContextStack::new();
        let mut instance = mount(&Label, 1, &stack);

        rerender(&Label, &mut instance, 2, &stack);
        update(&mut instance, 3, None);

        assert_eq!(instance.hook_calls, [(1, 2), (2, 3)]);
        assert_eq!(*instance.props(), 3);
    }

    #[test]
    fn element_commit_replaces_inputs() {
        let mut element = Element::new(1_u32, None);
        update(&mut element, 2, Some(ContextValue::new().with(LOCALE, "fr")));
        assert_eq!(*element.props(), 2);
        assert!(element.context().unwrap().contains(LOCALE));
    }
}
