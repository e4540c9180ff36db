// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The X11 device integration.
//!
//! [`X11Integration`] wires the display-server seam, the atom set, and the
//! event-reader thread into a
//! [`DeviceIntegration`](terrane_core::integration::DeviceIntegration).
//! It is generic over [`DisplayServer`] so the whole lifecycle can run
//! against a fake in tests; production code uses [`XcbServer`] through
//! [`X11Integration::open`].

use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use log::{debug, warn};
use raw_window_handle::{
    RawDisplayHandle, RawWindowHandle, XcbDisplayHandle, XcbWindowHandle,
};
use terrane_core::events::{CloseHandler, WindowId};
use terrane_core::integration::{Capability, DeviceIntegration};
use terrane_core::window::{ScreenSize, WindowRequest};

use crate::atoms::AtomSet;
use crate::reader::{EventReader, Shared};
use crate::server::{AtomId, DisplayServer, WindowHandle, X11Error, XcbServer};
use crate::size;

use core::fmt;
use std::sync::OnceLock;

/// Title applied to every output window.
pub const WINDOW_TITLE: &str = "terrane";

/// X11-backed device integration for developing the fullscreen stack
/// without device hardware.
///
/// Windows are always forced fullscreen whatever size the host requested;
/// that keeps the desktop rendition visually equivalent to a panel. The
/// integration declares no optional capabilities for the same reason — it
/// exists to exercise the rest of the framework, not to be a platform.
pub struct X11Integration<S: DisplayServer + 'static = XcbServer> {
    shared: Arc<Shared<S>>,
    handler: Arc<dyn CloseHandler>,
    helper: Option<WindowHandle>,
    window: Option<WindowHandle>,
    reader: Option<EventReader>,
    screen_size: OnceLock<ScreenSize>,
    size_override: Option<ScreenSize>,
}

impl<S: DisplayServer> fmt::Debug for X11Integration<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X11Integration")
            .field("helper", &self.helper)
            .field("window", &self.window)
            .field("size_override", &self.size_override)
            .finish_non_exhaustive()
    }
}

impl X11Integration<XcbServer> {
    /// Opens a display connection and builds an integration on it.
    ///
    /// # Errors
    ///
    /// Returns [`X11Error::Connect`] when the display cannot be opened.
    /// No window surface can exist without a connection, so the documented
    /// host policy is to treat this as fatal and terminate the process.
    pub fn open(handler: impl CloseHandler + 'static) -> Result<Self, X11Error> {
        Ok(Self::new(XcbServer::open()?, handler))
    }
}

impl<S: DisplayServer> X11Integration<S> {
    /// Builds an integration over an already-open server connection.
    ///
    /// The screen-size override is taken from the
    /// [`TERRANE_X11_SIZE`](crate::size::SIZE_ENV_VAR) environment variable.
    pub fn new(server: S, handler: impl CloseHandler + 'static) -> Self {
        Self::with_size_override(server, handler, size::override_from_env())
    }

    /// Builds an integration with an explicit screen-size override,
    /// bypassing the environment.
    pub fn with_size_override(
        server: S,
        handler: impl CloseHandler + 'static,
        size_override: Option<ScreenSize>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared::new(server)),
            handler: Arc::new(handler),
            helper: None,
            window: None,
            reader: None,
            screen_size: OnceLock::new(),
            size_override,
        }
    }

    fn atoms(&self) -> Result<AtomSet, X11Error> {
        if let Some(atoms) = self.shared.atoms.get() {
            return Ok(*atoms);
        }
        let atoms = AtomSet::intern(&self.shared.server)?;
        // A concurrent set can only have interned the same names.
        let _ = self.shared.atoms.set(atoms);
        Ok(atoms)
    }
}

impl<S: DisplayServer> DeviceIntegration for X11Integration<S> {
    type Error = X11Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        let helper = self.shared.server.create_helper_window()?;
        self.shared.server.flush()?;
        self.helper = Some(helper);

        self.shared.running.store(true, Ordering::Release);
        self.reader = Some(EventReader::spawn(
            Arc::clone(&self.shared),
            Arc::clone(&self.handler),
        )?);
        debug!("x11 integration running, helper window {helper:?}");
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), Self::Error> {
        // Clear the flag before waking: the reader must observe a stop
        // condition on its very next wake, not stale state.
        self.shared.running.store(false, Ordering::Release);

        let helper = self.helper.take();
        if let Some(helper) = helper {
            if let Err(error) = self.shared.server.send_wakeup(helper, AtomId::NONE) {
                // A dead connection also unblocks the reader, so joining
                // below stays safe.
                warn!("shutdown wake-up failed: {error}");
            }
        }
        if let Some(reader) = self.reader.take() {
            reader.join();
        }
        // The helper outlives the reader so the wake-up always has a live
        // target; it goes away only after the join.
        if let Some(helper) = helper {
            let destroyed = self
                .shared
                .server
                .destroy_window(helper)
                .and_then(|()| self.shared.server.flush());
            if let Err(error) = destroyed {
                warn!("helper window destroy failed: {error}");
            }
        }
        debug!("x11 integration destroyed");
        Ok(())
    }

    fn display_handle(&self) -> RawDisplayHandle {
        RawDisplayHandle::Xcb(XcbDisplayHandle::new(
            None,
            self.shared.server.screen_number(),
        ))
    }

    fn screen_size(&self) -> ScreenSize {
        if let Some(size) = self.screen_size.get() {
            return *size;
        }
        let size = match self.size_override {
            Some(configured) => configured,
            None => match self.shared.server.root_size() {
                Ok(queried) => queried,
                Err(error) => {
                    // Not cached: a later call may succeed.
                    warn!("root geometry query failed: {error}");
                    return ScreenSize::ZERO;
                }
            },
        };
        *self.screen_size.get_or_init(|| size)
    }

    fn create_window(
        &mut self,
        window: WindowId,
        request: &WindowRequest,
    ) -> Result<RawWindowHandle, Self::Error> {
        self.shared.set_current_window(Some(window));

        let atoms = self.atoms()?;
        let native = self.shared.server.create_output_window(request.size)?;

        self.shared
            .server
            .replace_property_utf8(native, atoms.net_wm_name, atoms.utf8_string, WINDOW_TITLE)?;
        self.shared.server.replace_property_atoms(
            native,
            atoms.wm_protocols,
            &[atoms.wm_delete_window],
        )?;
        // The fullscreen state, not the requested size, dictates the final
        // geometry. Development-backend policy: every window covers the
        // whole screen, like a panel would.
        self.shared.server.replace_property_atoms(
            native,
            atoms.net_wm_state,
            &[atoms.net_wm_state_fullscreen],
        )?;

        self.shared.server.map_window(native)?;
        self.shared.server.flush()?;
        self.window = Some(native);
        debug!("created output window {native:?} for {window:?}");

        let raw = NonZeroU32::new(native.0).ok_or(X11Error::NullWindowId)?;
        Ok(RawWindowHandle::Xcb(XcbWindowHandle::new(raw)))
    }

    fn destroy_window(&mut self, window: RawWindowHandle) {
        let RawWindowHandle::Xcb(handle) = window else {
            warn!("asked to destroy a non-XCB window handle, ignoring");
            return;
        };
        let native = WindowHandle(handle.window.get());
        if self.window == Some(native) {
            self.window = None;
            self.shared.set_current_window(None);
        }
        let destroyed = self
            .shared
            .server
            .destroy_window(native)
            .and_then(|()| self.shared.server.flush());
        if let Err(error) = destroyed {
            warn!("window destroy failed: {error}");
        }
    }

    fn supports(&self, _capability: Capability) -> bool {
        false
    }
}
