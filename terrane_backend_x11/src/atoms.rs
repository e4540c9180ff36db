// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed atom set the backend interns.
//!
//! Six atoms cover everything this backend does with window properties:
//! title-setting (`_NET_WM_NAME` + `UTF8_STRING`), close-notification
//! opt-in (`WM_PROTOCOLS` + `WM_DELETE_WINDOW`), and the fullscreen
//! assertion (`_NET_WM_STATE` + `_NET_WM_STATE_FULLSCREEN`).

use crate::server::{AtomId, DisplayServer, X11Error};

/// Interned identifiers for the protocol atoms the backend uses.
///
/// Interned once, on first window creation, then shared read-only with the
/// event-reader thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtomSet {
    /// `_NET_WM_NAME` — window title property.
    pub net_wm_name: AtomId,
    /// `UTF8_STRING` — value type of the title property.
    pub utf8_string: AtomId,
    /// `WM_PROTOCOLS` — property and message type for WM protocol opt-ins.
    pub wm_protocols: AtomId,
    /// `WM_DELETE_WINDOW` — the close-request protocol.
    pub wm_delete_window: AtomId,
    /// `_NET_WM_STATE` — EWMH window state property.
    pub net_wm_state: AtomId,
    /// `_NET_WM_STATE_FULLSCREEN` — the fullscreen state.
    pub net_wm_state_fullscreen: AtomId,
}

impl AtomSet {
    /// Interns the whole set on `server`.
    pub fn intern<S: DisplayServer + ?Sized>(server: &S) -> Result<Self, X11Error> {
        Ok(Self {
            net_wm_name: server.intern_atom("_NET_WM_NAME")?,
            utf8_string: server.intern_atom("UTF8_STRING")?,
            wm_protocols: server.intern_atom("WM_PROTOCOLS")?,
            wm_delete_window: server.intern_atom("WM_DELETE_WINDOW")?,
            net_wm_state: server.intern_atom("_NET_WM_STATE")?,
            net_wm_state_fullscreen: server.intern_atom("_NET_WM_STATE_FULLSCREEN")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AtomSet;
    use crate::fake::FakeServer;
    use terrane_core::window::ScreenSize;

    #[test]
    fn intern_produces_distinct_atoms() {
        let server = FakeServer::new(ScreenSize::new(1920, 1080));
        let atoms = AtomSet::intern(&server).expect("fake interning cannot fail");

        let all = [
            atoms.net_wm_name,
            atoms.utf8_string,
            atoms.wm_protocols,
            atoms.wm_delete_window,
            atoms.net_wm_state,
            atoms.net_wm_state_fullscreen,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b, "atoms must intern to distinct ids");
            }
        }
        assert_eq!(
            server.interned_names(),
            [
                "_NET_WM_NAME",
                "UTF8_STRING",
                "WM_PROTOCOLS",
                "WM_DELETE_WINDOW",
                "_NET_WM_STATE",
                "_NET_WM_STATE_FULLSCREEN",
            ]
        );
    }

    #[test]
    fn interning_twice_reuses_ids() {
        let server = FakeServer::new(ScreenSize::new(1920, 1080));
        let first = AtomSet::intern(&server).expect("fake interning cannot fail");
        let second = AtomSet::intern(&server).expect("fake interning cannot fail");
        assert_eq!(first, second);
    }
}
