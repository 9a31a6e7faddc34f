// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context channel identification.

use core::fmt;

/// Names one ambient channel inside a [`ContextValue`](crate::ContextValue).
///
/// Several unrelated channels usually share one context value, so keys should
/// be namespaced. The convention is `"@@<crate>/<channel>"`.
///
/// # Example
///
/// ```rust
/// use understory_context::ContextKey;
///
/// const LOCALE: ContextKey = ContextKey::new("@@my_app/locale");
/// assert_eq!(LOCALE.name(), "@@my_app/locale");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextKey(&'static str);

impl ContextKey {
    /// Creates a key with the given name.
    #[must_use]
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the key's name.
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextKey").field(&self.0).finish()
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn keys_compare_by_name() {
        let a = ContextKey::new("@@a/x");
        let b = ContextKey::new("@@a/x");
        let c = ContextKey::new("@@b/x");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }

    #[test]
    fn key_debug_and_display() {
        let key = ContextKey::new("@@a/x");
        assert_eq!(format!("{:?}", key), "ContextKey(\"@@a/x\")");
        assert_eq!(format!("{}", key), "@@a/x");
    }
}
