// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-definition identity tokens.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Serial of the next key to mint. Zero is never handed out, and the counter
/// stops at `u64::MAX` instead of wrapping.
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Identifies one themeable component definition inside a
/// [`ThemeBundle`](crate::ThemeBundle).
///
/// A key is minted by every call to [`Themeable::new`](crate::Themeable::new),
/// so wrapping the same component twice yields two keys. Keys have no public
/// constructor and carry nothing but their identity: the only way to address
/// a component's bundle entry is to obtain its key from the wrapped
/// definition via [`Themeable::theme_key`](crate::Themeable::theme_key).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ThemeKey(u64);

impl ThemeKey {
    /// Mints a key distinct from every key minted before.
    ///
    /// # Panics
    ///
    /// Panics if the serial space is exhausted.
    pub(crate) fn mint() -> Self {
        let Some(serial) = take_serial(&NEXT_SERIAL) else {
            panic!("ThemeKey serial space exhausted");
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(serial, "minted theme key");
        Self(serial)
    }
}

/// Takes the next serial from `counter`, or `None` once it reached `u64::MAX`.
///
/// The counter stays at `u64::MAX` after that, so no serial is handed out twice.
fn take_serial(counter: &AtomicU64) -> Option<u64> {
    counter
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |serial| {
            serial.checked_add(1)
        })
        .ok()
}

impl fmt::Debug for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ThemeKey").field(&self.0).finish()
    }
}
