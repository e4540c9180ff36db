// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`DisplayServer`] double for lifecycle and routing tests.
//!
//! `wait_for_event` blocks on a condvar until an event is queued, a wake-up
//! is sent, or the fake is disconnected — the same single-channel
//! cancellation shape as the real connection.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use terrane_core::window::ScreenSize;

use crate::server::{AtomId, DisplayServer, ServerEvent, WindowHandle, X11Error};

#[derive(Default)]
struct State {
    events: VecDeque<ServerEvent>,
    disconnected: bool,
    fail_next_root_size: bool,
    next_window: u32,
    root_size: ScreenSize,
    root_size_queries: u32,
    helper_windows: Vec<WindowHandle>,
    output_windows: Vec<(WindowHandle, ScreenSize)>,
    destroyed: Vec<WindowHandle>,
    mapped: Vec<WindowHandle>,
    atoms: Vec<String>,
    utf8_properties: Vec<(WindowHandle, AtomId, String)>,
    atom_properties: Vec<(WindowHandle, AtomId, Vec<AtomId>)>,
    wakeups: u32,
}

struct Inner {
    state: Mutex<State>,
    wakeup: Condvar,
}

/// Cloneable fake display server; clones share one server state.
#[derive(Clone)]
pub(crate) struct FakeServer {
    inner: Arc<Inner>,
}

impl FakeServer {
    pub(crate) fn new(root_size: ScreenSize) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    root_size,
                    next_window: 0x0060_0000,
                    ..State::default()
                }),
                wakeup: Condvar::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues an event and unparks a blocked `wait_for_event`.
    pub(crate) fn push_event(&self, event: ServerEvent) {
        self.state().events.push_back(event);
        self.inner.wakeup.notify_all();
    }

    /// Queues a well-formed `WM_DELETE_WINDOW` close request.
    pub(crate) fn push_close_request(&self) {
        let (wm_protocols, wm_delete, window) = {
            let state = self.state();
            (
                lookup(&state, "WM_PROTOCOLS").expect("WM_PROTOCOLS interned"),
                lookup(&state, "WM_DELETE_WINDOW").expect("WM_DELETE_WINDOW interned"),
                state
                    .output_windows
                    .last()
                    .map_or(WindowHandle(0), |(window, _)| *window),
            )
        };
        self.push_event(ServerEvent::ClientMessage {
            window,
            message_type: wm_protocols,
            format: 32,
            first_word: wm_delete.0,
        });
    }

    /// Severs the fake connection: pending waits and later requests fail.
    pub(crate) fn disconnect(&self) {
        self.state().disconnected = true;
        self.inner.wakeup.notify_all();
    }

    pub(crate) fn fail_next_root_size(&self) {
        self.state().fail_next_root_size = true;
    }

    pub(crate) fn atom(&self, name: &str) -> Option<AtomId> {
        lookup(&self.state(), name)
    }

    pub(crate) fn interned_names(&self) -> Vec<String> {
        self.state().atoms.clone()
    }

    pub(crate) fn root_size_queries(&self) -> u32 {
        self.state().root_size_queries
    }

    pub(crate) fn wakeups_sent(&self) -> u32 {
        self.state().wakeups
    }

    pub(crate) fn last_helper_window(&self) -> Option<WindowHandle> {
        self.state().helper_windows.last().copied()
    }

    pub(crate) fn is_destroyed(&self, window: WindowHandle) -> bool {
        self.state().destroyed.contains(&window)
    }

    pub(crate) fn last_output_window(&self) -> Option<WindowHandle> {
        self.state()
            .output_windows
            .last()
            .map(|(window, _)| *window)
    }

    pub(crate) fn output_window_size(&self, window: WindowHandle) -> ScreenSize {
        self.state()
            .output_windows
            .iter()
            .find(|(candidate, _)| *candidate == window)
            .map_or(ScreenSize::ZERO, |(_, size)| *size)
    }

    pub(crate) fn is_mapped(&self, window: WindowHandle) -> bool {
        self.state().mapped.contains(&window)
    }

    pub(crate) fn utf8_property(&self, window: WindowHandle, property: AtomId) -> Option<String> {
        self.state()
            .utf8_properties
            .iter()
            .rev()
            .find(|(candidate, prop, _)| *candidate == window && *prop == property)
            .map(|(_, _, value)| value.clone())
    }

    pub(crate) fn atom_property(
        &self,
        window: WindowHandle,
        property: AtomId,
    ) -> Option<Vec<AtomId>> {
        self.state()
            .atom_properties
            .iter()
            .rev()
            .find(|(candidate, prop, _)| *candidate == window && *prop == property)
            .map(|(_, _, values)| values.clone())
    }

    fn allocate_window(state: &mut State) -> WindowHandle {
        state.next_window += 1;
        WindowHandle(state.next_window)
    }

    fn check_connected(state: &State) -> Result<(), X11Error> {
        if state.disconnected {
            Err(X11Error::Disconnected)
        } else {
            Ok(())
        }
    }
}

fn lookup(state: &State, name: &str) -> Option<AtomId> {
    state
        .atoms
        .iter()
        .position(|candidate| candidate == name)
        .map(|index| AtomId(u32::try_from(index).unwrap_or(0) + 1))
}

impl DisplayServer for FakeServer {
    fn screen_number(&self) -> i32 {
        0
    }

    fn root_size(&self) -> Result<ScreenSize, X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        state.root_size_queries += 1;
        if state.fail_next_root_size {
            state.fail_next_root_size = false;
            return Err(X11Error::Disconnected);
        }
        Ok(state.root_size)
    }

    fn create_helper_window(&self) -> Result<WindowHandle, X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        let window = Self::allocate_window(&mut state);
        state.helper_windows.push(window);
        Ok(window)
    }

    fn create_output_window(&self, size: ScreenSize) -> Result<WindowHandle, X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        let window = Self::allocate_window(&mut state);
        state.output_windows.push((window, size));
        Ok(window)
    }

    fn destroy_window(&self, window: WindowHandle) -> Result<(), X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        state.destroyed.push(window);
        Ok(())
    }

    fn intern_atom(&self, name: &str) -> Result<AtomId, X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        if let Some(existing) = lookup(&state, name) {
            return Ok(existing);
        }
        state.atoms.push(name.to_owned());
        Ok(AtomId(u32::try_from(state.atoms.len()).unwrap_or(0)))
    }

    fn replace_property_utf8(
        &self,
        window: WindowHandle,
        property: AtomId,
        _value_type: AtomId,
        value: &str,
    ) -> Result<(), X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        state
            .utf8_properties
            .push((window, property, value.to_owned()));
        Ok(())
    }

    fn replace_property_atoms(
        &self,
        window: WindowHandle,
        property: AtomId,
        values: &[AtomId],
    ) -> Result<(), X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        state
            .atom_properties
            .push((window, property, values.to_vec()));
        Ok(())
    }

    fn map_window(&self, window: WindowHandle) -> Result<(), X11Error> {
        let mut state = self.state();
        Self::check_connected(&state)?;
        state.mapped.push(window);
        Ok(())
    }

    fn wait_for_event(&self) -> Result<ServerEvent, X11Error> {
        let mut state = self.state();
        loop {
            if let Some(event) = state.events.pop_front() {
                return Ok(event);
            }
            if state.disconnected {
                return Err(X11Error::Disconnected);
            }
            state = self
                .inner
                .wakeup
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    fn send_wakeup(&self, window: WindowHandle, message_type: AtomId) -> Result<(), X11Error> {
        {
            let mut state = self.state();
            Self::check_connected(&state)?;
            state.wakeups += 1;
            state.events.push_back(ServerEvent::ClientMessage {
                window,
                message_type,
                format: 32,
                first_word: 0,
            });
        }
        self.inner.wakeup.notify_all();
        Ok(())
    }

    fn flush(&self) -> Result<(), X11Error> {
        Self::check_connected(&self.state())
    }
}
