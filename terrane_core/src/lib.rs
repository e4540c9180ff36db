// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing contract for terrane platform device integrations.
//!
//! Terrane develops a fullscreen display stack for embedded devices. On a
//! device the stack drives the panel directly; on a developer desktop it
//! runs against a *device integration*, a thin backend that stands in for
//! the hardware. This crate defines the contract between the host framework
//! and those backends; the backends themselves live in sibling crates
//! (`terrane_backend_x11`, `terrane_backend_web`).
//!
//! # Architecture
//!
//! ```text
//!   host framework
//!       │ init / create_window / destroy_window / destroy
//!       ▼
//!   DeviceIntegration ──► native display + window handles
//!       │
//!       │ window_close_requested(WindowId)
//!       ▼
//!   CloseHandler (host callback)
//! ```
//!
//! **[`integration`]** — The [`DeviceIntegration`](integration::DeviceIntegration)
//! trait: one-directional Uninitialized → Running → Destroyed lifecycle,
//! window creation, screen-size and capability queries.
//!
//! **[`window`]** — Value types exchanged across the contract:
//! [`ScreenSize`](window::ScreenSize), [`SurfaceFormat`](window::SurfaceFormat),
//! [`WindowRequest`](window::WindowRequest). Immutable after construction.
//!
//! **[`events`]** — [`WindowId`](events::WindowId) and the
//! [`CloseHandler`](events::CloseHandler) seam used to route window-close
//! notifications back to the host.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod events;
pub mod integration;
pub mod window;
