// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The background event-reader thread.
//!
//! One thread owns the blocking protocol wait for the whole Running state.
//! It inspects exactly one event shape, the `WM_DELETE_WINDOW` client
//! message, and forwards it to the host's close handler; everything else is
//! drained and dropped. The loop exits when the shared running flag is
//! cleared or the connection is severed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::JoinHandle;

use log::debug;
use terrane_core::events::{CloseHandler, WindowId};

use crate::atoms::AtomSet;
use crate::server::{AtomId, DisplayServer, ServerEvent, X11Error};

/// State shared between the caller thread and the reader thread.
pub(crate) struct Shared<S> {
    /// The display-server connection. Two-thread use is part of the
    /// [`DisplayServer`] contract.
    pub(crate) server: S,
    /// Whether the reader should keep looping. The only cross-thread
    /// mutable flag; cleared (Release) before the wake-up message is sent.
    pub(crate) running: AtomicBool,
    /// Atom set, interned on first window creation. Client messages that
    /// arrive before interning cannot be close requests and are ignored.
    pub(crate) atoms: OnceLock<AtomSet>,
    /// The host window registered for close routing.
    pub(crate) current: Mutex<Option<WindowId>>,
}

impl<S> Shared<S> {
    pub(crate) fn new(server: S) -> Self {
        Self {
            server,
            running: AtomicBool::new(false),
            atoms: OnceLock::new(),
            current: Mutex::new(None),
        }
    }

    pub(crate) fn current_window(&self) -> Option<WindowId> {
        match self.current.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub(crate) fn set_current_window(&self, window: Option<WindowId>) {
        match self.current.lock() {
            Ok(mut guard) => *guard = window,
            Err(poisoned) => *poisoned.into_inner() = window,
        }
    }
}

/// Owns the reader thread's join handle.
pub(crate) struct EventReader {
    thread: JoinHandle<()>,
}

impl EventReader {
    /// Spawns the reader. The shared running flag must already be set.
    pub(crate) fn spawn<S: DisplayServer + 'static>(
        shared: Arc<Shared<S>>,
        handler: Arc<dyn CloseHandler>,
    ) -> Result<Self, X11Error> {
        let thread = std::thread::Builder::new()
            .name("terrane-x11-events".into())
            .spawn(move || run(&shared, &*handler))?;
        Ok(Self { thread })
    }

    /// Blocks until the reader thread exits.
    ///
    /// Callers must clear the running flag and send a wake-up first;
    /// otherwise this blocks until the next unrelated protocol event.
    pub(crate) fn join(self) {
        let _ = self.thread.join();
    }
}

fn run<S: DisplayServer>(shared: &Shared<S>, handler: &dyn CloseHandler) {
    while shared.running.load(Ordering::Acquire) {
        let event = match shared.server.wait_for_event() {
            Ok(event) => event,
            Err(error) => {
                debug!("event wait ended: {error}");
                break;
            }
        };

        let ServerEvent::ClientMessage {
            message_type,
            format,
            first_word,
            ..
        } = event
        else {
            continue;
        };
        let Some(atoms) = shared.atoms.get() else {
            continue;
        };

        if format == 32
            && message_type == atoms.wm_protocols
            && AtomId(first_word) == atoms.wm_delete_window
            && let Some(window) = shared.current_window()
        {
            handler.window_close_requested(window);
        }
    }
}
