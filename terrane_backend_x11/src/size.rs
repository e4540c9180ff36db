// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-size override configuration.
//!
//! Headless and constrained environments (CI, nested servers) often have no
//! meaningful root-window geometry. Setting [`SIZE_ENV_VAR`] to
//! `WIDTHxHEIGHT` makes the backend report that size instead of querying
//! the server.

use log::warn;
use terrane_core::window::ScreenSize;

/// Environment variable holding the screen-size override, e.g. `1920x1080`.
pub const SIZE_ENV_VAR: &str = "TERRANE_X11_SIZE";

/// Parses a `WIDTHxHEIGHT` override value.
///
/// Both dimensions must parse as positive integers; anything else yields
/// `None` and the backend falls back to the real root geometry.
#[must_use]
pub fn parse_size_override(value: &str) -> Option<ScreenSize> {
    let (width, height) = value.split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    let size = ScreenSize::new(width, height);
    (!size.is_empty()).then_some(size)
}

/// Reads the override from the process environment.
pub(crate) fn override_from_env() -> Option<ScreenSize> {
    let value = std::env::var(SIZE_ENV_VAR).ok()?;
    let parsed = parse_size_override(&value);
    if parsed.is_none() {
        warn!("ignoring malformed {SIZE_ENV_VAR}={value:?} (expected WIDTHxHEIGHT)");
    }
    parsed
}
