// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-scoped context propagation.

use alloc::vec::Vec;

use crate::requirements::ContextRequirements;
use crate::value::ContextValue;

/// Tracks the context in scope while a host walks its component tree.
///
/// A provider pushes its value when the walk enters its subtree and pops it
/// on the way out. Pushed values are merged over the enclosing scope, so a
/// nested provider shadows only the channels it supplies.
///
/// # Example
///
/// ```rust
/// use understory_context::{ContextKey, ContextRequirements, ContextStack, ContextValue};
///
/// const LOCALE: ContextKey = ContextKey::new("@@app/locale");
/// const DENSITY: ContextKey = ContextKey::new("@@app/density");
///
/// let mut stack = ContextStack::new();
/// assert!(stack.current().is_none());
///
/// stack.push(ContextValue::new().with(LOCALE, "en").with(DENSITY, 1_u8));
/// stack.push(ContextValue::new().with(DENSITY, 2_u8));
///
/// let cx = stack.scoped_for(&ContextRequirements::new().with(DENSITY)).unwrap();
/// assert_eq!(cx.get::<u8>(DENSITY), Some(&2));
/// assert!(!cx.contains(LOCALE));
///
/// stack.pop();
/// assert_eq!(stack.current().unwrap().get::<u8>(DENSITY), Some(&1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContextStack {
    /// Each frame is already merged with the frames below it.
    frames: Vec<ContextValue>,
}

impl ContextStack {
    /// Creates an empty stack (the tree root, with no context in scope).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a provider scope supplying `value`.
    pub fn push(&mut self, value: ContextValue) {
        let merged = match self.frames.last() {
            Some(top) => top.merge(&value),
            None => value,
        };
        self.frames.push(merged);
    }

    /// Leaves the innermost provider scope, returning its merged value.
    pub fn pop(&mut self) -> Option<ContextValue> {
        self.frames.pop()
    }

    /// Runs `f` with `value` in scope, popping it afterwards.
    pub fn provide<R>(&mut self, value: ContextValue, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push(value);
        let out = f(self);
        self.pop();
        out
    }

    /// Returns the full context in scope, or `None` at the root.
    #[must_use]
    pub fn current(&self) -> Option<&ContextValue> {
        self.frames.last()
    }

    /// Returns the context a consumer declaring `requirements` receives here.
    ///
    /// Returns `None` at the root, where no provider has supplied anything.
    #[must_use]
    pub fn scoped_for(&self, requirements: &ContextRequirements) -> Option<ContextValue> {
        self.current().map(|cx| cx.select(requirements))
    }

    /// Returns the number of provider scopes entered.
    #[must_use]
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
