// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The themeable component wrapper.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use understory_context::{Component, ComponentInstance, ContextRequirements, ContextValue};

use crate::channel::{theme_bundle_entry, theme_context_requirements};
use crate::key::ThemeKey;
use crate::resolve::{ThemeCache, apply_default, same_layer};
use crate::value::ThemeObject;

/// Props that can carry an explicit theme.
///
/// An explicit theme replaces the ambient one entirely; it is not merged with
/// it. Only the default theme still sits underneath.
pub trait ThemeProp {
    /// The explicit theme, if one was given.
    fn theme(&self) -> Option<&ThemeObject>;
}

impl ThemeProp for Option<ThemeObject> {
    fn theme(&self) -> Option<&ThemeObject> {
        self.as_ref()
    }
}

impl ThemeProp for ThemeObject {
    fn theme(&self) -> Option<&ThemeObject> {
        Some(self)
    }
}

/// State shared by a themeable definition and all of its instances.
#[derive(Debug)]
struct ThemeableType {
    key: ThemeKey,
    name: String,
    default_theme: RefCell<Option<ThemeObject>>,
}

/// A component definition wrapped with theme resolution.
///
/// `Themeable::new(definition)` produces a new definition that behaves like
/// `definition`, except that:
///
/// - it consumes the ambient theme channel in addition to whatever
///   `definition` consumes;
/// - its instances ([`Themed`]) expose a resolved [`theme`](Themed::theme);
/// - it owns a fresh [`ThemeKey`] addressing its entry in a
///   [`ThemeBundle`](crate::ThemeBundle), and optionally a default theme.
///
/// Cloning a `Themeable` clones the definition, not the wrap: clones share
/// the key and the default theme.
///
/// # Example
///
/// ```rust
/// use understory_context::{Component, ContextStack, ContextValue, Element, mount};
/// use understory_themeable::{ThemeBundle, ThemeObject, Themeable, pack_theme_bundle};
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
/// let button = Themeable::new(Button)
///     .with_default_theme(ThemeObject::builder().set("color", "blue").set("size", "s").build());
///
/// let bundle = ThemeBundle::builder()
///     .theme_for(&button, ThemeObject::builder().set("color", "red").build())
///     .build();
///
/// let mut stack = ContextStack::new();
/// stack.push(pack_theme_bundle(bundle));
///
/// let instance = mount(&button, None, &stack);
/// assert_eq!(instance.theme().get_str("color"), Some("red"));
/// assert_eq!(instance.theme().get_str("size"), Some("s"));
/// ```
#[derive(Clone, Debug)]
pub struct Themeable<D> {
    inner: D,
    ty: Rc<ThemeableType>,
    requirements: ContextRequirements,
}

impl<D: Component> Themeable<D>
where
    D::Props: ThemeProp,
{
    /// Wraps `inner`, minting a new [`ThemeKey`] for the result.
    pub fn new(inner: D) -> Self {
        let requirements = inner
            .context_requirements()
            .union(&theme_context_requirements());
        let ty = ThemeableType {
            key: ThemeKey::mint(),
            name: inner.display_name().into(),
            default_theme: RefCell::new(None),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(component = %ty.name, key = ?ty.key, "wrapped themeable component");
        Self {
            inner,
            ty: Rc::new(ty),
            requirements,
        }
    }
}

impl<D> Themeable<D> {
    /// The key providers address this component's bundle entry with.
    #[must_use]
    #[inline]
    pub fn theme_key(&self) -> ThemeKey {
        self.ty.key
    }

    /// Sets the default theme, builder style.
    #[must_use]
    pub fn with_default_theme(self, theme: ThemeObject) -> Self {
        self.set_default_theme(Some(theme));
        self
    }

    /// Replaces the default theme of this definition and all its instances.
    ///
    /// Instances whose theme is already resolved keep it until their next
    /// invalidating update.
    pub fn set_default_theme(&self, theme: Option<ThemeObject>) {
        *self.ty.default_theme.borrow_mut() = theme;
    }

    /// Returns the default theme, if any.
    #[must_use]
    pub fn default_theme(&self) -> Option<ThemeObject> {
        self.ty.default_theme.borrow().clone()
    }

    /// Returns the wrapped definition.
    #[must_use]
    #[inline]
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D> Component for Themeable<D>
where
    D: Component,
    D::Props: ThemeProp,
{
    type Props = D::Props;
    type Instance = Themed<D::Instance>;

    fn display_name(&self) -> &str {
        self.inner.display_name()
    }

    fn context_requirements(&self) -> ContextRequirements {
        self.requirements.clone()
    }

    fn instantiate(&self, props: Self::Props, context: Option<ContextValue>) -> Self::Instance {
        Themed {
            inner: self.inner.instantiate(props, context),
            ty: Rc::clone(&self.ty),
            cache: ThemeCache::new(),
        }
    }
}

/// An instance of a [`Themeable`] component.
///
/// Delegates everything to the wrapped instance, except that it resolves and
/// caches [`theme`](Self::theme), and clears that cache in
/// [`will_update`](ComponentInstance::will_update) when the explicit theme or
/// this component's ambient bundle entry is about to change. A
/// [`commit`](ComponentInstance::commit) without the hook runs the same check,
/// so the cache never outlives the inputs it was resolved from.
#[derive(Debug)]
pub struct Themed<I> {
    inner: I,
    ty: Rc<ThemeableType>,
    cache: ThemeCache,
}

impl<I> Themed<I> {
    /// Returns the wrapped instance.
    #[must_use]
    #[inline]
    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// The key of this instance's definition.
    #[must_use]
    #[inline]
    pub fn theme_key(&self) -> ThemeKey {
        self.ty.key
    }

    /// The display name of this instance's definition, as it was when wrapped.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.ty.name
    }

    /// Returns `true` if the theme is resolved and cached.
    #[must_use]
    #[inline]
    pub fn is_theme_resolved(&self) -> bool {
        self.cache.is_resolved()
    }
}

impl<I> Themed<I>
where
    I: ComponentInstance,
    I::Props: ThemeProp,
{
    /// The effective theme of this instance.
    ///
    /// Resolved on first read after construction or invalidation from, in
    /// order of precedence: the explicit `theme` prop, this component's entry
    /// in the ambient [`ThemeBundle`](crate::ThemeBundle), the default theme,
    /// and finally an empty theme. Later reads return the cached object.
    pub fn theme(&self) -> &ThemeObject {
        self.cache.get_or_resolve(|| self.resolve())
    }

    fn resolve(&self) -> ThemeObject {
        let explicit = self.inner.props().theme();
        let layer = explicit.or_else(|| theme_bundle_entry(self.inner.context(), self.ty.key));
        let default = self.ty.default_theme.borrow();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            component = %self.ty.name,
            source = ?crate::resolve::ThemeSource::of(explicit, layer, default.as_ref()),
            "resolved theme"
        );
        apply_default(layer, default.as_ref())
    }

    /// Clears the cached theme if the explicit theme or this component's
    /// bundle entry differs between the current and the incoming inputs.
    fn invalidate_if_changed(
        &mut self,
        next_props: &I::Props,
        next_context: Option<&ContextValue>,
    ) {
        let key = self.ty.key;
        let prop_changed = !same_layer(self.inner.props().theme(), next_props.theme());
        let ambient_changed = !same_layer(
            theme_bundle_entry(self.inner.context(), key),
            theme_bundle_entry(next_context, key),
        );
        if (prop_changed || ambient_changed) && self.cache.is_resolved() {
            self.cache.invalidate();
            #[cfg(feature = "tracing")]
            tracing::trace!(
                component = %self.ty.name,
                prop_changed,
                ambient_changed,
                "invalidated theme"
            );
        }
    }
}

impl<I> ComponentInstance for Themed<I>
where
    I: ComponentInstance,
    I::Props: ThemeProp,
{
    type Props = I::Props;

    fn props(&self) -> &Self::Props {
        self.inner.props()
    }

    fn context(&self) -> Option<&ContextValue> {
        self.inner.context()
    }

    fn will_update(&mut self, next_props: &Self::Props, next_context: Option<&ContextValue>) {
        self.invalidate_if_changed(next_props, next_context);
        self.inner.will_update(next_props, next_context);
    }

    fn commit(&mut self, props: Self::Props, context: Option<ContextValue>) {
        self.invalidate_if_changed(&props, context.as_ref());
        self.inner.commit(props, context);
    }
}
