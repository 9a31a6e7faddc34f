// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Themeable: theme resolution for components.
//!
//! A component wrapped with [`Themeable`] gets a resolved
//! [`theme`](Themed::theme) from three layers, most specific first:
//!
//! **Explicit → Ambient → Default → empty**
//!
//! - **Explicit**: the `theme` prop of the instance (see [`ThemeProp`]). It
//!   replaces the ambient layer outright.
//! - **Ambient**: the entry addressed to this component's [`ThemeKey`] in the
//!   [`ThemeBundle`] an ancestor packed into the context with
//!   [`pack_theme_bundle`].
//! - **Default**: an optional theme set on the wrapped definition. The winning
//!   layer is merged over it, one level deep.
//!
//! ## Identity
//!
//! Every call to [`Themeable::new`] mints a new [`ThemeKey`]. Providers use it
//! to address a theme to one component definition, so wrapping the same
//! component twice gives two independently themeable definitions.
//!
//! ## Caching
//!
//! [`Themed`] resolves its theme on first read and returns the same object
//! until an update changes its inputs. Changes are detected in
//! [`ComponentInstance::will_update`](understory_context::ComponentInstance::will_update)
//! by identity: a new explicit theme object, or a different ambient entry for
//! this component's key. Anything else, including changes to other context
//! channels or to other components' bundle entries, keeps the cache.
//!
//! Hosts without a pre-update hook can use [`SnapshotThemeCache`], which
//! compares inputs against the previous resolution on every read.
//!
//! ## Example
//!
//! ```rust
//! use understory_context::{Component, ContextStack, ContextValue, Element, mount, rerender};
//! use understory_themeable::{ThemeBundle, ThemeObject, Themeable, pack_theme_bundle};
//!
//! struct Button;
//!
//! impl Component for Button {
//!     type Props = Option<ThemeObject>;
//!     type Instance = Element<Option<ThemeObject>>;
//!
//!     fn display_name(&self) -> &str {
//!         "Button"
//!     }
//!
//!     fn instantiate(&self, props: Self::Props, context: Option<ContextValue>) -> Self::Instance {
//!         Element::new(props, context)
//!     }
//! }
//!
//! let button = Themeable::new(Button)
//!     .with_default_theme(ThemeObject::builder().set("color", "blue").build());
//!
//! // No provider: the default theme applies.
//! let root = ContextStack::new();
//! let plain = mount(&button, None, &root);
//! assert_eq!(plain.theme().get_str("color"), Some("blue"));
//!
//! // A provider addresses a theme to `button`.
//! let mut stack = ContextStack::new();
//! stack.push(pack_theme_bundle(
//!     ThemeBundle::builder()
//!         .theme_for(&button, ThemeObject::builder().set("color", "red").set("size", "m").build())
//!         .build(),
//! ));
//! let mut themed = mount(&button, None, &stack);
//! assert_eq!(themed.theme().get_str("color"), Some("red"));
//!
//! // An explicit theme wins over the provider.
//! let green = ThemeObject::builder().set("color", "green").build();
//! rerender(&button, &mut themed, Some(green), &stack);
//! assert_eq!(themed.theme().get_str("color"), Some("green"));
//! assert_eq!(themed.theme().get_str("size"), None);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events when keys are
//!   minted, themes are resolved, and caches are invalidated.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod bundle;
mod channel;
mod key;
mod resolve;
mod themeable;
mod value;

pub use bundle::{ThemeBundle, ThemeBundleBuilder};
pub use channel::{
    ChannelTypeError, THEME_CONTEXT_KEY, pack_theme_bundle, theme_bundle_entry,
    theme_context_requirements, try_unpack_theme_bundle, unpack_theme_bundle,
};
pub use key::ThemeKey;
pub use resolve::{SnapshotThemeCache, ThemeCache, ThemeSource, resolve_theme};
pub use themeable::{ThemeProp, Themeable, Themed};
pub use value::{ThemeObject, ThemeObjectBuilder, ThemeValue};
