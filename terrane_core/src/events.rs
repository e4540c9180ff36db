// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window identity and close-notification routing.
//!
//! A backend never interprets a [`WindowId`]; it only remembers which one the
//! host registered last and hands it back through [`CloseHandler`] when the
//! windowing system asks for that window to close.

use core::fmt;

/// Identifies a host-framework window.
///
/// Hosts assign window IDs; backends treat them as opaque routing keys.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WindowId(pub u64);

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId({})", self.0)
    }
}

/// Receives window-close notifications from a device integration.
///
/// Backends may invoke this from a background thread (the X11 backend calls
/// it from its event-reader thread), so implementations must be
/// `Send + Sync`. Closures work directly:
///
/// ```
/// use terrane_core::events::{CloseHandler, WindowId};
///
/// fn wants_handler(_h: impl CloseHandler) {}
///
/// wants_handler(|window: WindowId| {
///     let _ = window;
/// });
/// ```
pub trait CloseHandler: Send + Sync {
    /// The windowing system requested that `window` be closed.
    ///
    /// This is a notification, not a command: the host decides whether the
    /// window actually closes.
    fn window_close_requested(&self, window: WindowId);
}

impl<F: Fn(WindowId) + Send + Sync> CloseHandler for F {
    fn window_close_requested(&self, window: WindowId) {
        self(window);
    }
}
