// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared context consumption.

use smallvec::SmallVec;

use crate::key::ContextKey;

/// Most components consume a handful of channels at most.
const INLINE_CAPACITY: usize = 4;

/// The set of context channels a component declares it consumes.
///
/// A host only hands a component the channels it declared (see
/// [`ContextValue::select`](crate::ContextValue::select)), so wrappers that add
/// a channel must [`union`](Self::union) their requirement with the wrapped
/// component's.
///
/// # Example
///
/// ```rust
/// use understory_context::{ContextKey, ContextRequirements};
///
/// const LOCALE: ContextKey = ContextKey::new("@@app/locale");
/// const THEME: ContextKey = ContextKey::new("@@app/theme");
///
/// let base = ContextRequirements::new().with(LOCALE);
/// let wrapped = base.union(&ContextRequirements::new().with(THEME));
///
/// assert!(wrapped.contains(LOCALE));
/// assert!(wrapped.contains(THEME));
/// assert_eq!(wrapped.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextRequirements {
    /// Sorted and free of duplicates.
    keys: SmallVec<[ContextKey; INLINE_CAPACITY]>,
}

impl ContextRequirements {
    /// Creates an empty requirement set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` to the set, builder style.
    #[must_use]
    pub fn with(mut self, key: ContextKey) -> Self {
        self.require(key);
        self
    }

    /// Adds `key` to the set.
    ///
    /// Returns `true` if the key was not already required.
    pub fn require(&mut self, key: ContextKey) -> bool {
        match self.keys.binary_search(&key) {
            Ok(_) => false,
            Err(idx) => {
                self.keys.insert(idx, key);
                true
            }
        }
    }

    /// Returns `true` if `key` is required.
    #[must_use]
    pub fn contains(&self, key: ContextKey) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Returns a set holding every key of `self` and of `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for key in other.iter() {
            out.require(key);
        }
        out
    }

    /// Returns an iterator over the required keys, in key order.
    pub fn iter(&self) -> impl Iterator<Item = ContextKey> + '_ {
        self.keys.iter().copied()
    }

    /// Returns the number of required keys.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is required.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<ContextKey> for ContextRequirements {
    fn from_iter<I: IntoIterator<Item = ContextKey>>(iter: I) -> Self {
        let mut out = Self::new();
        for key in iter {
            out.require(key);
        }
        out
    }
}
