// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ambient theme channel.
//!
//! A [`ThemeBundle`] travels down the tree inside a [`ContextValue`], stored
//! under [`THEME_CONTEXT_KEY`]. Other channels can share the same context
//! value; the key is namespaced so they never clash.

use core::fmt;

use understory_context::{ContextKey, ContextRequirements, ContextValue};

use crate::bundle::ThemeBundle;
use crate::key::ThemeKey;
use crate::value::ThemeObject;

/// The context key theme bundles are stored under.
pub const THEME_CONTEXT_KEY: ContextKey = ContextKey::new("@@understory_themeable/theme");

/// The context requirement of every themeable component.
#[must_use]
pub fn theme_context_requirements() -> ContextRequirements {
    ContextRequirements::new().with(THEME_CONTEXT_KEY)
}

/// Wraps `bundle` in a new context value.
///
/// The result holds only the theme channel. To combine it with other ambient
/// data, merge it with [`ContextValue::merge`].
///
/// ```rust
/// use understory_context::{ContextKey, ContextValue};
/// use understory_themeable::{ThemeBundle, pack_theme_bundle, unpack_theme_bundle};
///
/// const LOCALE: ContextKey = ContextKey::new("@@app/locale");
///
/// let locale = ContextValue::new().with(LOCALE, "en");
/// let bundle = ThemeBundle::new();
/// let context = locale.merge(&pack_theme_bundle(bundle.clone()));
///
/// assert!(context.contains(LOCALE));
/// assert!(ThemeBundle::ptr_eq(unpack_theme_bundle(Some(&context)).unwrap(), &bundle));
/// ```
#[must_use]
pub fn pack_theme_bundle(bundle: ThemeBundle) -> ContextValue {
    ContextValue::new().with(THEME_CONTEXT_KEY, bundle)
}

/// Reads the theme bundle out of an ambient context value.
///
/// Returns `None` when there is no context (the tree root), when no provider
/// supplied a bundle, or when the theme slot holds something else.
#[must_use]
pub fn unpack_theme_bundle(context: Option<&ContextValue>) -> Option<&ThemeBundle> {
    context?.get(THEME_CONTEXT_KEY)
}

/// Reads the theme bundle, reporting a slot that holds a foreign value.
///
/// This is the checked form of [`unpack_theme_bundle`]: `Ok(None)` means no
/// bundle was provided, which is not an error.
pub fn try_unpack_theme_bundle(
    context: Option<&ContextValue>,
) -> Result<Option<&ThemeBundle>, ChannelTypeError> {
    let Some(context) = context else {
        return Ok(None);
    };
    if !context.contains(THEME_CONTEXT_KEY) {
        return Ok(None);
    }
    context
        .get::<ThemeBundle>(THEME_CONTEXT_KEY)
        .map(Some)
        .ok_or(ChannelTypeError {
            key: THEME_CONTEXT_KEY,
        })
}

/// Looks up the theme addressed to `key` in the ambient bundle.
#[must_use]
pub fn theme_bundle_entry(context: Option<&ContextValue>, key: ThemeKey) -> Option<&ThemeObject> {
    unpack_theme_bundle(context)?.get(key)
}

/// The theme slot of a context value holds something other than a
/// [`ThemeBundle`].
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ChannelTypeError {
    /// The context key whose entry had the wrong type.
    pub key: ContextKey,
}

impl fmt::Debug for ChannelTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelTypeError {{ key: {:?} }}", self.key)
    }
}

impl fmt::Display for ChannelTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "context entry {} does not hold a theme bundle", self.key)
    }
}

impl core::error::Error for ChannelTypeError {}
