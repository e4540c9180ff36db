// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! X11 development backend for terrane.
//!
//! This is not an X11 platform backend in any general sense. It exists so
//! the fullscreen display stack can be developed on a desktop, with no
//! device or driver requirements: each requested window becomes an ordinary
//! X11 window that is immediately forced fullscreen, and the only window
//! manager event the backend cares about is the close request, which it
//! forwards to the host.
//!
//! # Structure
//!
//! - [`server`] — the narrow [`DisplayServer`] seam over the X11 protocol
//!   (open/close, create/destroy window, set property, wait-for-event,
//!   send-event) and [`XcbServer`], its `x11rb`-backed implementation.
//!   Everything above this seam is testable against a fake server.
//! - [`atoms`] — the fixed set of interned protocol atoms the backend needs
//!   for title-setting, close-notification opt-in, and fullscreen assertion.
//! - `reader` (private) — the single background thread that owns the
//!   blocking event wait.
//! - [`integration`] — [`X11Integration`], the
//!   [`DeviceIntegration`](terrane_core::integration::DeviceIntegration)
//!   implementation tying the pieces together.
//! - [`size`] — the `TERRANE_X11_SIZE` screen-size override for headless
//!   and constrained environments.
//!
//! # Threading
//!
//! Exactly one background thread performs the blocking event wait; no other
//! thread may wait on the same connection. The wait has no timeout: shutdown
//! responsiveness relies entirely on the wake-up client message sent through
//! the same connection, so the ordering in
//! [`destroy`](terrane_core::integration::DeviceIntegration::destroy)
//! (clear flag, wake, join) must not be rearranged.

mod reader;

pub mod atoms;
pub mod integration;
pub mod server;
pub mod size;

#[cfg(test)]
pub(crate) mod fake;

pub use integration::{WINDOW_TITLE, X11Integration};
pub use server::{AtomId, DisplayServer, ServerEvent, WindowHandle, X11Error, XcbServer};
pub use size::{SIZE_ENV_VAR, parse_size_override};
pub use terrane_core::integration::DeviceIntegration;
