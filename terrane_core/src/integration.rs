// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The device-integration contract.
//!
//! A device integration is the piece of platform glue that gives the
//! fullscreen display stack somewhere to put pixels: a real panel on a
//! device, or a stand-in window on a developer desktop. The host framework
//! owns the integration and drives its lifecycle; the integration owns
//! whatever connection or background machinery its platform needs.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──init()──► Running ──destroy()──► Destroyed
//! ```
//!
//! Transitions are one-directional and occur exactly once each, always
//! driven by explicit host calls, never automatically. Window creation and
//! all queries require the Running state.

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use crate::events::WindowId;
use crate::window::{ScreenSize, WindowRequest};

/// Optional platform capabilities a device integration may declare.
///
/// The host queries these to decide which framework features to enable.
/// Development backends typically declare none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Capability {
    /// More than one output window may exist at a time.
    MultipleWindows,
    /// Output windows can be resized after creation.
    ResizableWindows,
    /// The platform reports when frames actually reached the screen.
    PresentTiming,
}

/// Platform glue that provides native display and window surfaces.
///
/// Implementations delegate all wire-level work to an external windowing
/// library; this trait only fixes the shape of the calls the host makes and
/// the handles it receives back.
pub trait DeviceIntegration {
    /// Error type for fallible operations.
    type Error: core::error::Error;

    /// Uninitialized → Running.
    ///
    /// Brings up whatever background machinery the platform needs (event
    /// readers, helper windows). Called exactly once.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Running → Destroyed.
    ///
    /// Stops background machinery and tears down any platform resources the
    /// integration created; the platform connection itself is released when
    /// the integration value is dropped. Called exactly once; no other
    /// method may be called afterwards.
    fn destroy(&mut self) -> Result<(), Self::Error>;

    /// Native display handle for surface creation (EGL, Vulkan WSI, ...).
    fn display_handle(&self) -> RawDisplayHandle;

    /// The screen size, resolved once and cached by the integration.
    fn screen_size(&self) -> ScreenSize;

    /// Creates a native output window per `request` and registers `window`
    /// as the current platform window for close-notification routing.
    fn create_window(
        &mut self,
        window: WindowId,
        request: &WindowRequest,
    ) -> Result<RawWindowHandle, Self::Error>;

    /// Destroys a native window previously returned by
    /// [`create_window`](Self::create_window).
    fn destroy_window(&mut self, window: RawWindowHandle);

    /// Whether this integration provides the given optional capability.
    fn supports(&self, capability: Capability) -> bool;
}
