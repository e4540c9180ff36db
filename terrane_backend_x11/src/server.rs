// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The narrow seam between the backend and the X11 protocol library.
//!
//! [`DisplayServer`] covers exactly the calls the backend makes and nothing
//! more, so the lifecycle and event-routing logic above it can be exercised
//! against a fake in tests. [`XcbServer`] is the production implementation
//! over `x11rb`'s pure-Rust `RustConnection`.

use terrane_core::window::ScreenSize;
use thiserror::Error;
use x11rb::connection::Connection as _;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};
use x11rb::protocol::Event;
use x11rb::protocol::xproto::{
    AtomEnum, ClientMessageEvent, ConnectionExt as _, CreateWindowAux, EventMask, PropMode, Screen,
    WindowClass,
};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use core::fmt;

/// Errors from display-server operations.
#[derive(Debug, Error)]
pub enum X11Error {
    /// The display connection could not be opened.
    ///
    /// There is no recovery from this: without a connection no window
    /// surface can exist, so the documented host policy is to log the error
    /// and terminate the process.
    #[error("could not open display: {0}")]
    Connect(#[from] ConnectError),
    /// The connection broke while sending a request.
    #[error("display connection lost: {0}")]
    Connection(#[from] ConnectionError),
    /// The server answered a request with an error.
    #[error("display server request failed: {0}")]
    Reply(#[from] ReplyError),
    /// Resource-id allocation failed.
    #[error("resource id allocation failed: {0}")]
    IdAllocation(#[from] ReplyOrIdError),
    /// The server handed back a null window id.
    #[error("display server returned a null window id")]
    NullWindowId,
    /// The event reader thread could not be spawned.
    #[error("could not spawn event reader: {0}")]
    SpawnReader(#[from] std::io::Error),
    /// The connection was severed while waiting for events.
    #[error("display connection severed")]
    Disconnected,
}

/// A server-side window identifier.
///
/// Owned by the display server; the backend only caches it between calls.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u32);

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowHandle({:#x})", self.0)
    }
}

/// A server-interned atom standing in for a string property name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtomId(pub u32);

impl AtomId {
    /// The reserved "no atom" value.
    pub const NONE: Self = Self(0);
}

impl fmt::Debug for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtomId({})", self.0)
    }
}

/// A protocol event, reduced to what the backend inspects.
///
/// The backend only ever reacts to client messages; every other event kind
/// collapses to [`Other`](Self::Other) and is drained without buffering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerEvent {
    /// A client message delivered to `window`.
    ClientMessage {
        /// Destination window.
        window: WindowHandle,
        /// Message type atom.
        message_type: AtomId,
        /// Data element width in bits (close requests use 32).
        format: u8,
        /// First 32-bit word of the message payload.
        first_word: u32,
    },
    /// Any event kind the backend does not inspect.
    Other,
}

/// Pass-through interface to the display server.
///
/// One method per protocol call the backend needs. Implementations must be
/// usable from two threads at once: the caller thread issues requests while
/// the reader thread sits in [`wait_for_event`](Self::wait_for_event).
pub trait DisplayServer: Send + Sync {
    /// The screen number of the connection, for native handle interchange.
    fn screen_number(&self) -> i32;

    /// Queries the root window geometry.
    fn root_size(&self) -> Result<ScreenSize, X11Error>;

    /// Creates the input-only helper window used as the wake-up target.
    ///
    /// The helper never becomes visible; it exists purely as an addressable
    /// destination for out-of-band client messages.
    fn create_helper_window(&self) -> Result<WindowHandle, X11Error>;

    /// Creates an unmapped input-output window of the given size.
    fn create_output_window(&self, size: ScreenSize) -> Result<WindowHandle, X11Error>;

    /// Destroys a window.
    fn destroy_window(&self, window: WindowHandle) -> Result<(), X11Error>;

    /// Interns one atom by name.
    fn intern_atom(&self, name: &str) -> Result<AtomId, X11Error>;

    /// Replaces a UTF-8 string property on `window`.
    fn replace_property_utf8(
        &self,
        window: WindowHandle,
        property: AtomId,
        value_type: AtomId,
        value: &str,
    ) -> Result<(), X11Error>;

    /// Replaces an atom-list property on `window`.
    fn replace_property_atoms(
        &self,
        window: WindowHandle,
        property: AtomId,
        values: &[AtomId],
    ) -> Result<(), X11Error>;

    /// Maps `window`, making it visible.
    fn map_window(&self, window: WindowHandle) -> Result<(), X11Error>;

    /// Blocks until the next protocol event arrives.
    ///
    /// There is deliberately no timeout variant: cancellation travels
    /// through the connection itself via [`send_wakeup`](Self::send_wakeup).
    fn wait_for_event(&self) -> Result<ServerEvent, X11Error>;

    /// Sends an empty client message of `message_type` to `window` and
    /// flushes, so a concurrent [`wait_for_event`](Self::wait_for_event)
    /// returns promptly.
    fn send_wakeup(&self, window: WindowHandle, message_type: AtomId) -> Result<(), X11Error>;

    /// Flushes buffered requests to the server.
    fn flush(&self) -> Result<(), X11Error>;
}

/// [`DisplayServer`] over an `x11rb` [`RustConnection`].
pub struct XcbServer {
    conn: RustConnection,
    screen_num: usize,
}

impl fmt::Debug for XcbServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XcbServer")
            .field("screen_num", &self.screen_num)
            .finish_non_exhaustive()
    }
}

impl XcbServer {
    /// Opens a connection to the display named by the `DISPLAY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`X11Error::Connect`] when no connection can be established.
    /// This is unrecoverable for the backend; see the error's documentation
    /// for the host policy.
    pub fn open() -> Result<Self, X11Error> {
        let (conn, screen_num) = x11rb::connect(None)?;
        Ok(Self { conn, screen_num })
    }

    fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    fn create_window(&self, class: WindowClass, size: ScreenSize) -> Result<WindowHandle, X11Error> {
        let wid = self.conn.generate_id()?;
        let screen = self.screen();
        self.conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            wid,
            screen.root,
            0,
            0,
            clamp_dimension(size.width),
            clamp_dimension(size.height),
            0,
            class,
            screen.root_visual,
            &CreateWindowAux::new(),
        )?;
        Ok(WindowHandle(wid))
    }
}

/// X11 window geometry is 16-bit on the wire.
fn clamp_dimension(pixels: u32) -> u16 {
    u16::try_from(pixels).unwrap_or(u16::MAX)
}

impl DisplayServer for XcbServer {
    fn screen_number(&self) -> i32 {
        i32::try_from(self.screen_num).unwrap_or(0)
    }

    fn root_size(&self) -> Result<ScreenSize, X11Error> {
        let root = self.screen().root;
        let geometry = self.conn.get_geometry(root)?.reply()?;
        Ok(ScreenSize::new(
            u32::from(geometry.width),
            u32::from(geometry.height),
        ))
    }

    fn create_helper_window(&self) -> Result<WindowHandle, X11Error> {
        // 1x1 is the smallest geometry the protocol accepts; input-only
        // windows have no visible surface regardless.
        self.create_window(WindowClass::INPUT_ONLY, ScreenSize::new(1, 1))
    }

    fn create_output_window(&self, size: ScreenSize) -> Result<WindowHandle, X11Error> {
        self.create_window(WindowClass::INPUT_OUTPUT, size)
    }

    fn destroy_window(&self, window: WindowHandle) -> Result<(), X11Error> {
        self.conn.destroy_window(window.0)?;
        Ok(())
    }

    fn intern_atom(&self, name: &str) -> Result<AtomId, X11Error> {
        let reply = self.conn.intern_atom(false, name.as_bytes())?.reply()?;
        Ok(AtomId(reply.atom))
    }

    fn replace_property_utf8(
        &self,
        window: WindowHandle,
        property: AtomId,
        value_type: AtomId,
        value: &str,
    ) -> Result<(), X11Error> {
        self.conn.change_property8(
            PropMode::REPLACE,
            window.0,
            property.0,
            value_type.0,
            value.as_bytes(),
        )?;
        Ok(())
    }

    fn replace_property_atoms(
        &self,
        window: WindowHandle,
        property: AtomId,
        values: &[AtomId],
    ) -> Result<(), X11Error> {
        let raw: Vec<u32> = values.iter().map(|atom| atom.0).collect();
        self.conn.change_property32(
            PropMode::REPLACE,
            window.0,
            property.0,
            AtomEnum::ATOM,
            &raw,
        )?;
        Ok(())
    }

    fn map_window(&self, window: WindowHandle) -> Result<(), X11Error> {
        self.conn.map_window(window.0)?;
        Ok(())
    }

    fn wait_for_event(&self) -> Result<ServerEvent, X11Error> {
        let event = self.conn.wait_for_event()?;
        Ok(match event {
            Event::ClientMessage(message) => ServerEvent::ClientMessage {
                window: WindowHandle(message.window),
                message_type: AtomId(message.type_),
                format: message.format,
                first_word: message.data.as_data32()[0],
            },
            _ => ServerEvent::Other,
        })
    }

    fn send_wakeup(&self, window: WindowHandle, message_type: AtomId) -> Result<(), X11Error> {
        let message = ClientMessageEvent::new(32, window.0, message_type.0, [0, 0, 0, 0, 0]);
        self.conn
            .send_event(false, window.0, EventMask::NO_EVENT, message)?;
        self.conn.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<(), X11Error> {
        self.conn.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::clamp_dimension;

    #[test]
    fn oversized_dimensions_clamp_to_wire_maximum() {
        assert_eq!(clamp_dimension(800), 800);
        assert_eq!(clamp_dimension(100_000), u16::MAX);
    }
}
