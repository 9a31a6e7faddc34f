// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme bundles: per-component themes supplied by an ancestor.

use alloc::rc::Rc;
use core::fmt;

use hashbrown::HashMap;

use crate::key::ThemeKey;
use crate::themeable::Themeable;
use crate::value::ThemeObject;

/// A set of themes, each addressed to one themeable component definition.
///
/// A provider builds a bundle with [`ThemeBundleBuilder`], packs it into the
/// ambient context with [`pack_theme_bundle`](crate::pack_theme_bundle), and
/// every [`Themed`](crate::Themed) instance below it picks the entry keyed by
/// its own definition's [`ThemeKey`].
///
/// Bundles are immutable and cheap to clone.
#[derive(Clone, Default)]
pub struct ThemeBundle {
    themes: Rc<HashMap<ThemeKey, ThemeObject>>,
}

impl ThemeBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder for a new bundle.
    #[must_use]
    pub fn builder() -> ThemeBundleBuilder {
        ThemeBundleBuilder::new()
    }

    /// Returns a builder seeded with this bundle's entries.
    #[must_use]
    pub fn to_builder(&self) -> ThemeBundleBuilder {
        ThemeBundleBuilder {
            themes: HashMap::clone(&self.themes),
        }
    }

    /// Gets the theme addressed to `key`.
    #[must_use]
    pub fn get(&self, key: ThemeKey) -> Option<&ThemeObject> {
        self.themes.get(&key)
    }

    /// Returns `true` if the bundle has a theme for `key`.
    #[must_use]
    pub fn contains(&self, key: ThemeKey) -> bool {
        self.themes.contains_key(&key)
    }

    /// Returns the number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Returns `true` if the bundle has no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Returns `true` if `a` and `b` are the same bundle allocation.
    #[must_use]
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.themes, &b.themes)
    }
}

impl fmt::Debug for ThemeBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.themes.iter()).finish()
    }
}

/// Builder for [`ThemeBundle`].
///
/// # Example
///
/// ```rust
/// use understory_context::{Component, ContextValue, Element};
/// use understory_themeable::{ThemeBundle, ThemeObject, Themeable};
///
/// struct Button;
///
/// impl Component for Button {
///     type Props = Option<ThemeObject>;
///     type Instance = Element<Option<ThemeObject>>;
///
///     fn display_name(&self) -> &str {
///         "Button"
///     }
///
///     fn instantiate(&self, props: Self::Props, context: Option<ContextValue>) -> Self::Instance {
///         Element::new(props, context)
///     }
/// }
///
/// let button = Themeable::new(Button);
/// let red = ThemeObject::builder().set("color", "red").build();
///
/// let bundle = ThemeBundle::builder().theme_for(&button, red.clone()).build();
/// assert!(ThemeObject::ptr_eq(bundle.get(button.theme_key()).unwrap(), &red));
/// ```
#[derive(Debug, Default)]
pub struct ThemeBundleBuilder {
    themes: HashMap<ThemeKey, ThemeObject>,
}

impl ThemeBundleBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses `theme` to the component definition identified by `key`.
    ///
    /// A previous theme for the same key is replaced.
    #[must_use]
    pub fn insert(mut self, key: ThemeKey, theme: ThemeObject) -> Self {
        self.themes.insert(key, theme);
        self
    }

    /// Addresses `theme` to `component`.
    #[must_use]
    pub fn theme_for<D>(self, component: &Themeable<D>, theme: ThemeObject) -> Self {
        self.insert(component.theme_key(), theme)
    }

    /// Removes the theme addressed to `key`, if any.
    #[must_use]
    pub fn remove(mut self, key: ThemeKey) -> Self {
        self.themes.remove(&key);
        self
    }

    /// Builds the bundle.
    #[must_use]
    pub fn build(self) -> ThemeBundle {
        ThemeBundle {
            themes: Rc::new(self.themes),
        }
    }
}
