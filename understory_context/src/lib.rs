// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Context: ambient values and component lifecycle contracts.
//!
//! This crate models the parts of a component host that higher-level crates
//! such as `understory_themeable` build on, without rendering anything:
//!
//! - **Ambient values.** [`ContextValue`] is an immutable map from namespaced
//!   [`ContextKey`]s to shared entries. Independent channels (theme, locale,
//!   density, ...) coexist in one value under their own keys.
//! - **Declared consumption.** [`ContextRequirements`] lists the channels a
//!   component reads. A component only ever sees the channels it declared.
//! - **Tree scoping.** [`ContextStack`] tracks the context in scope while a
//!   host walks its tree; nested providers shadow outer ones per channel.
//! - **Lifecycle.** [`Component`] definitions create [`ComponentInstance`]s.
//!   [`update`] fires [`ComponentInstance::will_update`] with the incoming
//!   inputs before committing them, so instances can diff old against new.
//!
//! ## Example
//!
//! ```rust
//! use understory_context::{
//!     Component, ComponentInstance, ContextKey, ContextRequirements, ContextStack,
//!     ContextValue, Element, mount, rerender,
//! };
//!
//! const LOCALE: ContextKey = ContextKey::new("@@app/locale");
//!
//! struct Greeting;
//!
//! impl Component for Greeting {
//!     type Props = &'static str;
//!     type Instance = Element<&'static str>;
//!
//!     fn display_name(&self) -> &str {
//!         "Greeting"
//!     }
//!
//!     fn context_requirements(&self) -> ContextRequirements {
//!         ContextRequirements::new().with(LOCALE)
//!     }
//!
//!     fn instantiate(&self, props: Self::Props, context: Option<ContextValue>) -> Self::Instance {
//!         Element::new(props, context)
//!     }
//! }
//!
//! let mut stack = ContextStack::new();
//! stack.push(ContextValue::new().with(LOCALE, "en"));
//!
//! let mut greeting = mount(&Greeting, "hello", &stack);
//! assert_eq!(greeting.context().unwrap().get::<&str>(LOCALE), Some(&"en"));
//!
//! rerender(&Greeting, &mut greeting, "hi", &stack);
//! assert_eq!(*greeting.props(), "hi");
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod component;
mod key;
mod requirements;
mod stack;
mod value;

pub use component::{Component, ComponentInstance, Element, mount, rerender, update};
pub use key::ContextKey;
pub use requirements::ContextRequirements;
pub use stack::ContextStack;
pub use value::ContextValue;
