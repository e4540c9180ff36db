// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for terrane.
//!
//! In the browser the display stack cannot open its own file dialogs; it
//! hands the job to the File System Access API (`showOpenFilePicker` /
//! `showSaveFilePicker`). The host framework's dialogs speak the toolkit
//! filter syntax (`"Images (*.png *.jpg)"`, `"*.txt"`), which that API does
//! not understand, so this crate translates:
//!
//! - [`filters`] — parses filter strings into [`FilterType`] groups,
//!   rejecting patterns the web API cannot represent. Pure Rust, no JS
//!   engine required; tested on any host.
//! - [`picker`] — assembles picker option sets from a filter list and, on
//!   wasm32, mirrors them onto the JS objects the browser call expects.
//!
//! Everything here is synchronous and stateless between calls; concurrent
//! callers share nothing mutable.

pub mod filters;
pub mod picker;

pub use filters::{FilterType, filter_list_to_types, parse_filter};
pub use picker::{OpenFileOptions, SaveFileOptions, open_file_options, save_file_options};
