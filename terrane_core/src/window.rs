// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value types exchanged between the host framework and a device integration.
//!
//! All of these are plain data, immutable once constructed. They describe
//! what the host asks for; what a backend actually provides is backend
//! policy (the X11 development backend, for example, always produces a
//! fullscreen window no matter which size was requested).

use core::fmt;

/// A screen or window size in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenSize {
    /// The empty size, used as the "unknown" sentinel.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Creates a size from width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Debug for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Requested color channel depths for a window surface.
///
/// Backends that render through an external surface API pass this along;
/// backends that do not control pixel formats (the X11 development backend)
/// accept and ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceFormat {
    /// Red channel bits.
    pub red_bits: u8,
    /// Green channel bits.
    pub green_bits: u8,
    /// Blue channel bits.
    pub blue_bits: u8,
    /// Alpha channel bits.
    pub alpha_bits: u8,
}

impl Default for SurfaceFormat {
    /// 8 bits per channel, with alpha.
    fn default() -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
        }
    }
}

/// Everything the host supplies when asking for a native window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct WindowRequest {
    /// Requested window size.
    pub size: ScreenSize,
    /// Requested surface format.
    pub format: SurfaceFormat,
}

#[cfg(test)]
mod tests {
    use super::ScreenSize;

    #[test]
    fn zero_size_is_empty() {
        assert!(ScreenSize::ZERO.is_empty());
        assert!(ScreenSize::new(0, 600).is_empty());
        assert!(ScreenSize::new(800, 0).is_empty());
        assert!(!ScreenSize::new(800, 600).is_empty());
    }
}
