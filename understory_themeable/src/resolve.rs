// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme resolution and caching.
//!
//! Resolution combines three layers, most specific first:
//!
//! **Explicit → Ambient → Default → empty**
//!
//! The explicit layer replaces the ambient layer outright; the default layer
//! sits underneath whichever of the two won, merged one level deep.

use core::cell::OnceCell;

use crate::value::ThemeObject;

/// Which layer supplied the tokens of a resolved theme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ThemeSource {
    /// The explicit `theme` prop, over the default theme if any.
    Explicit,
    /// The ambient bundle entry, over the default theme if any.
    Ambient,
    /// The default theme alone.
    Default,
    /// Nothing; the theme is empty.
    Empty,
}

impl ThemeSource {
    /// Classifies a set of resolution inputs.
    #[must_use]
    pub fn of(
        explicit: Option<&ThemeObject>,
        ambient: Option<&ThemeObject>,
        default: Option<&ThemeObject>,
    ) -> Self {
        match (explicit, ambient, default) {
            (Some(_), _, _) => Self::Explicit,
            (None, Some(_), _) => Self::Ambient,
            (None, None, Some(_)) => Self::Default,
            (None, None, None) => Self::Empty,
        }
    }
}

/// Resolves the effective theme from its three layers.
///
/// When `explicit` is present, `ambient` is ignored. When there is no
/// `default`, the winning layer is returned as is, sharing its identity;
/// otherwise the result is a new object with the winning layer merged over
/// the default (see [`ThemeObject::merge`]).
///
/// # Example
///
/// ```rust
/// use understory_themeable::{ThemeObject, resolve_theme};
///
/// let default = ThemeObject::builder().set("a", 1).set("b", 2).build();
/// let explicit = ThemeObject::builder().set("b", 3).build();
/// let ambient = ThemeObject::builder().set("c", 4).build();
///
/// let theme = resolve_theme(Some(&explicit), Some(&ambient), Some(&default));
/// assert_eq!(theme, ThemeObject::builder().set("a", 1).set("b", 3).build());
///
/// assert!(resolve_theme(None, None, None).is_empty());
/// ```
#[must_use]
pub fn resolve_theme(
    explicit: Option<&ThemeObject>,
    ambient: Option<&ThemeObject>,
    default: Option<&ThemeObject>,
) -> ThemeObject {
    apply_default(explicit.or(ambient), default)
}

/// Lays the winning layer over the default theme.
pub(crate) fn apply_default(
    layer: Option<&ThemeObject>,
    default: Option<&ThemeObject>,
) -> ThemeObject {
    match (default, layer) {
        (Some(default), Some(layer)) => ThemeObject::merge(default, layer),
        (Some(default), None) => ThemeObject::merge(default, &ThemeObject::new()),
        (None, Some(layer)) => layer.clone(),
        (None, None) => ThemeObject::new(),
    }
}

/// Returns `true` if two optional layers are the same object, or both absent.
pub(crate) fn same_layer(a: Option<&ThemeObject>, b: Option<&ThemeObject>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => ThemeObject::ptr_eq(a, b),
        _ => false,
    }
}

/// A lazily resolved theme, cleared explicitly by its owner.
///
/// The owner decides when inputs changed and calls
/// [`invalidate`](Self::invalidate); the next read resolves again.
#[derive(Clone, Debug, Default)]
pub struct ThemeCache {
    resolved: OnceCell<ThemeObject>,
}

impl ThemeCache {
    /// Creates an unresolved cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached theme, if resolved.
    #[must_use]
    #[inline]
    pub fn get(&self) -> Option<&ThemeObject> {
        self.resolved.get()
    }

    /// Returns the cached theme, resolving it with `resolve` first if needed.
    pub fn get_or_resolve(&self, resolve: impl FnOnce() -> ThemeObject) -> &ThemeObject {
        self.resolved.get_or_init(resolve)
    }

    /// Discards the cached theme.
    ///
    /// Returns `true` if a theme was cached.
    pub fn invalidate(&mut self) -> bool {
        self.resolved.take().is_some()
    }

    /// Returns `true` if a theme is cached.
    #[must_use]
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

/// A theme cache for hosts without a pre-update hook.
///
/// Instead of being told about changes, it remembers the inputs of its last
/// resolution and compares them by identity on every read. Nothing is
/// recomputed while the same explicit theme, ambient entry, and default theme
/// objects keep coming in.
///
/// # Example
///
/// ```rust
/// use understory_themeable::{SnapshotThemeCache, ThemeObject};
///
/// let mut cache = SnapshotThemeCache::new();
/// let red = ThemeObject::builder().set("color", "red").build();
///
/// let first = cache.resolve(None, Some(&red), None).clone();
/// let second = cache.resolve(None, Some(&red), None).clone();
/// assert!(ThemeObject::ptr_eq(&first, &second));
///
/// let green = ThemeObject::builder().set("color", "green").build();
/// assert_eq!(cache.resolve(None, Some(&green), None).get_str("color"), Some("green"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SnapshotThemeCache {
    cache: ThemeCache,
    snapshot: Option<Snapshot>,
}

#[derive(Clone, Debug)]
struct Snapshot {
    explicit: Option<ThemeObject>,
    ambient: Option<ThemeObject>,
    default: Option<ThemeObject>,
}

impl Snapshot {
    fn matches(
        &self,
        explicit: Option<&ThemeObject>,
        ambient: Option<&ThemeObject>,
        default: Option<&ThemeObject>,
    ) -> bool {
        same_layer(self.explicit.as_ref(), explicit)
            && same_layer(self.ambient.as_ref(), ambient)
            && same_layer(self.default.as_ref(), default)
    }
}

impl SnapshotThemeCache {
    /// Creates an unresolved cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the theme for these inputs, reusing the cached one if the
    /// inputs are the same objects as last time.
    pub fn resolve(
        &mut self,
        explicit: Option<&ThemeObject>,
        ambient: Option<&ThemeObject>,
        default: Option<&ThemeObject>,
    ) -> &ThemeObject {
        let fresh = self
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.matches(explicit, ambient, default));
        if !fresh {
            self.cache.invalidate();
            self.snapshot = Some(Snapshot {
                explicit: explicit.cloned(),
                ambient: ambient.cloned(),
                default: default.cloned(),
            });
        }
        self.cache
            .get_or_resolve(|| resolve_theme(explicit, ambient, default))
    }

    /// Returns `true` if a theme is cached.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.cache.is_resolved()
    }
}
