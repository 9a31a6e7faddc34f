// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme objects: named style tokens and their values.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// The value of one style token.
#[derive(Clone, Debug, PartialEq)]
pub enum ThemeValue {
    /// A string token, such as a color name or a CSS class.
    Str(String),
    /// A numeric token, such as a size or an opacity.
    Number(f64),
    /// A nested group of tokens.
    Nested(ThemeObject),
}

impl ThemeValue {
    /// Returns the string, if this is a string token.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric token.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the nested group, if this is one.
    #[must_use]
    pub fn as_nested(&self) -> Option<&ThemeObject> {
        match self {
            Self::Nested(theme) => Some(theme),
            _ => None,
        }
    }
}

impl From<&str> for ThemeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for ThemeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for ThemeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for ThemeValue {
    fn from(value: f32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for ThemeValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for ThemeValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<ThemeObject> for ThemeValue {
    fn from(value: ThemeObject) -> Self {
        Self::Nested(value)
    }
}

/// A mapping from style-token names to [`ThemeValue`]s.
///
/// Theme objects are immutable after creation and cheap to clone: clones
/// share one allocation. That gives every theme object an identity, which the
/// resolution cache uses to detect changed inputs without comparing contents.
///
/// - [`ThemeObject::ptr_eq`] compares identity.
/// - `==` compares contents.
///
/// # Example
///
/// ```rust
/// use understory_themeable::ThemeObject;
///
/// let theme = ThemeObject::builder()
///     .set("color", "blue")
///     .set("padding", 4)
///     .build();
///
/// assert_eq!(theme.get_str("color"), Some("blue"));
/// assert_eq!(theme.get_number("padding"), Some(4.0));
///
/// let same = theme.clone();
/// assert!(ThemeObject::ptr_eq(&theme, &same));
///
/// let lookalike = ThemeObject::builder().set("color", "blue").set("padding", 4).build();
/// assert_eq!(theme, lookalike);
/// assert!(!ThemeObject::ptr_eq(&theme, &lookalike));
/// ```
#[derive(Clone, Default)]
pub struct ThemeObject {
    inner: Rc<ThemeData>,
}

#[derive(Debug, Default, PartialEq)]
struct ThemeData {
    /// Sorted by token name for binary search lookup.
    tokens: Vec<(String, ThemeValue)>,
}

impl ThemeObject {
    /// Creates an empty theme object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder for a new theme object.
    #[must_use]
    pub fn builder() -> ThemeObjectBuilder {
        ThemeObjectBuilder::new()
    }

    fn from_tokens(tokens: Vec<(String, ThemeValue)>) -> Self {
        Self {
            inner: Rc::new(ThemeData { tokens }),
        }
    }

    #[inline]
    fn find(&self, name: &str) -> Result<usize, usize> {
        self.inner
            .tokens
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
    }

    /// Gets the value of the token `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ThemeValue> {
        self.find(name).ok().map(|idx| &self.inner.tokens[idx].1)
    }

    /// Gets a string token.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ThemeValue::as_str)
    }

    /// Gets a numeric token.
    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ThemeValue::as_number)
    }

    /// Gets a nested token group.
    #[must_use]
    pub fn get_nested(&self, name: &str) -> Option<&Self> {
        self.get(name).and_then(ThemeValue::as_nested)
    }

    /// Returns `true` if the token `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_ok()
    }

    /// Returns the number of tokens.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.tokens.len()
    }

    /// Returns `true` if there are no tokens.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.tokens.is_empty()
    }

    /// Returns an iterator over token names, in name order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.tokens.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over tokens, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeValue)> + '_ {
        self.inner.tokens.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if `a` and `b` are the same theme object.
    #[must_use]
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Returns a new theme with the tokens of `overlay` laid over `base`.
    ///
    /// The merge is one level deep: a token present in `overlay` replaces the
    /// token of the same name in `base` outright, even when both are nested
    /// groups. The result is always a new object.
    ///
    /// ```rust
    /// use understory_themeable::ThemeObject;
    ///
    /// let base = ThemeObject::builder().set("a", 1).set("b", 2).build();
    /// let overlay = ThemeObject::builder().set("b", 3).build();
    ///
    /// let merged = ThemeObject::merge(&base, &overlay);
    /// assert_eq!(merged, ThemeObject::builder().set("a", 1).set("b", 3).build());
    /// ```
    #[must_use]
    pub fn merge(base: &Self, overlay: &Self) -> Self {
        let mut tokens = Vec::with_capacity(base.len() + overlay.len());
        let mut a = base.inner.tokens.iter().peekable();
        let mut b = overlay.inner.tokens.iter().peekable();
        loop {
            match (a.peek(), b.peek()) {
                (Some((ka, _)), Some((kb, _))) => match ka.cmp(kb) {
                    core::cmp::Ordering::Less => tokens.extend(a.next().cloned()),
                    core::cmp::Ordering::Greater => tokens.extend(b.next().cloned()),
                    core::cmp::Ordering::Equal => {
                        a.next();
                        tokens.extend(b.next().cloned());
                    }
                },
                (Some(_), None) => tokens.extend(a.next().cloned()),
                (None, Some(_)) => tokens.extend(b.next().cloned()),
                (None, None) => break,
            }
        }
        Self::from_tokens(tokens)
    }

    /// Returns a new theme with `top` laid over `self`.
    ///
    /// Shorthand for [`ThemeObject::merge(self, top)`](Self::merge).
    #[must_use]
    pub fn overlay(&self, top: &Self) -> Self {
        Self::merge(self, top)
    }
}

impl PartialEq for ThemeObject {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.inner == other.inner
    }
}

impl fmt::Debug for ThemeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ThemeObject
where
    K: Into<String>,
    V: Into<ThemeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ThemeObjectBuilder::new(), |builder, (k, v)| builder.set(k, v))
            .build()
    }
}

/// Builder for [`ThemeObject`].
///
/// Setting a token that is already present replaces its value.
#[derive(Debug, Default)]
pub struct ThemeObjectBuilder {
    tokens: Vec<(String, ThemeValue)>,
}

impl ThemeObjectBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token `name` to `value`.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ThemeValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .tokens
            .binary_search_by(|(k, _)| k.as_str().cmp(name.as_str()))
        {
            Ok(idx) => self.tokens[idx].1 = value,
            Err(idx) => self.tokens.insert(idx, (name, value)),
        }
        self
    }

    /// Builds the theme object.
    #[must_use]
    pub fn build(self) -> ThemeObject {
        ThemeObject::from_tokens(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn empty_theme() {
        let theme = ThemeObject::new();
        assert!(theme.is_empty());
        assert_eq!(theme.len(), 0);
        assert!(theme.get("color").is_none());
    }

    #[test]
    fn builder_replaces_duplicate_tokens() {
        let theme = ThemeObject::builder()
            .set("color", "red")
            .set("color", "green")
            .build();
        assert_eq!(theme.len(), 1);
        assert_eq!(theme.get_str("color"), Some("green"));
    }

    #[test]
    fn typed_accessors() {
        let nested = ThemeObject::builder().set("hover", "navy").build();
        let theme = ThemeObject::builder()
            .set("color", "blue")
            .set("size", 1.5)
            .set("states", nested.clone())
            .build();

        assert_eq!(theme.get_str("color"), Some("blue"));
        assert_eq!(theme.get_number("color"), None);
        assert_eq!(theme.get_number("size"), Some(1.5));
        assert!(ThemeObject::ptr_eq(theme.get_nested("states").unwrap(), &nested));
        assert!(theme.contains("states"));
        assert!(!theme.contains("border"));
    }

    #[test]
    fn keys_are_sorted() {
        let theme: ThemeObject = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        assert_eq!(theme.keys().collect::<Vec<_>>(), ["a", "m", "z"]);
    }

    #[test]
    fn equality_is_structural_identity_is_not() {
        let a = ThemeObject::builder().set("color", "red").build();
        let b = ThemeObject::builder().set("color", "red").build();
        assert_eq!(a, b);
        assert!(!ThemeObject::ptr_eq(&a, &b));
        assert!(ThemeObject::ptr_eq(&a, &a.clone()));
    }

    #[test]
    fn merge_overlays_top_level_tokens() {
        let base = ThemeObject::builder().set("a", 1).set("b", 2).build();
        let overlay = ThemeObject::builder().set("b", 3).set("c", 4).build();
        let merged = base.overlay(&overlay);

        assert_eq!(merged.get_number("a"), Some(1.0));
        assert_eq!(merged.get_number("b"), Some(3.0));
        assert_eq!(merged.get_number("c"), Some(4.0));
        // Operands are untouched.
        assert_eq!(base.get_number("b"), Some(2.0));
        assert_eq!(overlay.len(), 2);
    }

    #[test]
    fn merge_replaces_nested_groups_without_descending() {
        let base = ThemeObject::builder()
            .set(
                "border",
                ThemeObject::builder().set("width", 1).set("style", "solid").build(),
            )
            .build();
        let overlay = ThemeObject::builder()
            .set("border", ThemeObject::builder().set("width", 2).build())
            .build();

        let merged = ThemeObject::merge(&base, &overlay);
        let border = merged.get_nested("border").unwrap();
        assert_eq!(border.get_number("width"), Some(2.0));
        assert!(!border.contains("style"));
    }

    #[test]
    fn merge_always_allocates() {
        let base = ThemeObject::builder().set("a", 1).build();
        let merged = ThemeObject::merge(&base, &ThemeObject::new());
        assert_eq!(merged, base);
        assert!(!ThemeObject::ptr_eq(&merged, &base));
    }

    #[test]
    fn debug_prints_tokens() {
        let theme = ThemeObject::builder().set("color", "red").build();
        let debug = format!("{:?}", theme);
        assert!(debug.contains("color"));
        assert!(debug.contains("red"));
    }

    #[test]
    fn value_conversions() {
        assert_eq!(ThemeValue::from("x").as_str(), Some("x"));
        assert_eq!(ThemeValue::from(String::from("y")).as_str(), Some("y"));
        assert_eq!(ThemeValue::from(2_u32).as_number(), Some(2.0));
        assert_eq!(ThemeValue::from(-2_i32).as_number(), Some(-2.0));
        assert_eq!(ThemeValue::from(0.5_f32).as_number(), Some(0.5));
        assert!(ThemeValue::from(ThemeObject::new()).as_nested().is_some());
    }
}
