// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ambient value carried down a component tree.
//!
//! This module provides [`ContextValue`], an immutable map from [`ContextKey`]
//! to shared, type-erased entries.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::key::ContextKey;
use crate::requirements::ContextRequirements;

/// A shared, type-erased context entry.
///
/// Cloning shares the allocation, so an entry keeps its identity as it is
/// copied between context values.
#[derive(Clone)]
pub(crate) struct Entry {
    inner: Rc<dyn Any>,
    type_id: TypeId,
}

impl Entry {
    fn new<T: 'static>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
            type_id: TypeId::of::<T>(),
        }
    }

    fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.type_id == TypeId::of::<T>() {
            self.inner.downcast_ref()
        } else {
            None
        }
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// The merged ambient value visible at one position of a component tree.
///
/// A context value holds any number of independent channels, each stored
/// under its own [`ContextKey`]. It is immutable: every "modifying" operation
/// returns a new value and leaves the receiver untouched.
///
/// # Identity
///
/// Entries are reference counted. Operations that copy entries between
/// values ([`merge`](Self::merge), [`select`](Self::select), `clone`) share
/// them rather than cloning the payload, so consumers can detect whether an
/// entry changed with [`ContextValue::entry_ptr_eq`] instead of comparing
/// contents.
///
/// # Example
///
/// ```rust
/// use understory_context::{ContextKey, ContextValue};
///
/// const LOCALE: ContextKey = ContextKey::new("@@app/locale");
/// const DENSITY: ContextKey = ContextKey::new("@@app/density");
///
/// let root = ContextValue::new().with(LOCALE, "en-GB");
/// let nested = root.with(DENSITY, 2_u8);
///
/// assert_eq!(root.get::<&str>(LOCALE), Some(&"en-GB"));
/// assert!(!root.contains(DENSITY));
/// assert_eq!(nested.get::<u8>(DENSITY), Some(&2));
///
/// // The locale entry is shared, not copied.
/// assert!(ContextValue::entry_ptr_eq(Some(&root), Some(&nested), LOCALE));
/// ```
#[derive(Clone, Default)]
pub struct ContextValue {
    /// Sorted by `ContextKey` for binary search lookup.
    entries: Rc<Vec<(ContextKey, Entry)>>,
}

impl ContextValue {
    /// Creates an empty context value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn from_entries(entries: Vec<(ContextKey, Entry)>) -> Self {
        Self {
            entries: Rc::new(entries),
        }
    }

    #[inline]
    fn find(&self, key: ContextKey) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |(k, _)| *k)
    }

    fn entry(&self, key: ContextKey) -> Option<&Entry> {
        self.find(key).ok().map(|idx| &self.entries[idx].1)
    }

    /// Returns a new context value with `value` stored under `key`.
    ///
    /// An existing entry under `key` is replaced in the returned value.
    /// `self` is not modified.
    #[must_use]
    pub fn with<T: 'static>(&self, key: ContextKey, value: T) -> Self {
        let mut entries = Vec::clone(&self.entries);
        let entry = Entry::new(value);
        match entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(idx) => entries[idx].1 = entry,
            Err(idx) => entries.insert(idx, (key, entry)),
        }
        Self::from_entries(entries)
    }

    /// Gets the value stored under `key`.
    ///
    /// Returns `None` if the key is absent or holds a value of another type.
    #[must_use]
    pub fn get<T: 'static>(&self, key: ContextKey) -> Option<&T> {
        self.entry(key).and_then(Entry::downcast_ref)
    }

    /// Returns `true` if an entry exists under `key`, whatever its type.
    #[must_use]
    pub fn contains(&self, key: ContextKey) -> bool {
        self.find(key).is_ok()
    }

    /// Returns the [`TypeId`] of the entry under `key`, if any.
    #[must_use]
    pub fn type_id_of(&self, key: ContextKey) -> Option<TypeId> {
        self.entry(key).map(|entry| entry.type_id)
    }

    /// Returns the number of channels in this value.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this value carries no channels.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys in this value, in key order.
    pub fn keys(&self) -> impl Iterator<Item = ContextKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Returns the union of `self` and `over`.
    ///
    /// Where both carry the same key, the entry from `over` wins. This is how
    /// a nested provider shadows an outer one.
    #[must_use]
    pub fn merge(&self, over: &Self) -> Self {
        if over.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return over.clone();
        }
        let mut entries = Vec::with_capacity(self.len() + over.len());
        let mut a = self.entries.iter().peekable();
        let mut b = over.entries.iter().peekable();
        loop {
            match (a.peek(), b.peek()) {
                (Some((ka, _)), Some((kb, _))) => {
                    if ka < kb {
                        entries.extend(a.next().cloned());
                    } else if kb < ka {
                        entries.extend(b.next().cloned());
                    } else {
                        a.next();
                        entries.extend(b.next().cloned());
                    }
                }
                (Some(_), None) => entries.extend(a.next().cloned()),
                (None, Some(_)) => entries.extend(b.next().cloned()),
                (None, None) => break,
            }
        }
        Self::from_entries(entries)
    }

    /// Returns only the channels named in `requirements`.
    ///
    /// This is the view a consuming component receives: channels it did not
    /// declare are invisible to it.
    #[must_use]
    pub fn select(&self, requirements: &ContextRequirements) -> Self {
        let entries: Vec<_> = self
            .entries
            .iter()
            .filter(|(k, _)| requirements.contains(*k))
            .cloned()
            .collect();
        if entries.len() == self.len() {
            return self.clone();
        }
        Self::from_entries(entries)
    }

    /// Returns `true` if `a` and `b` are the same context value allocation.
    #[must_use]
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.entries, &b.entries)
    }

    /// Returns `true` if `a` and `b` hold the identical entry under `key`.
    ///
    /// Absent contexts and absent entries compare equal to each other.
    #[must_use]
    pub fn entry_ptr_eq(a: Option<&Self>, b: Option<&Self>, key: ContextKey) -> bool {
        let a = a.and_then(|cx| cx.entry(key));
        let b = b.and_then(|cx| cx.entry(key));
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextValue")
            .field("keys", &self.entries.iter().map(|(k, _)| k.name()).collect::<Vec<_>>())
            .finish()
    }
}
