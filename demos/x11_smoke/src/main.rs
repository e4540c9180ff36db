// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manual smoke demo for the X11 development backend.
//!
//! Opens the display, creates one (fullscreen) output window, and waits for
//! the window manager's close request before tearing everything down in
//! order. Run with `RUST_LOG=debug` for lifecycle logs; set
//! `TERRANE_X11_SIZE=800x600` to exercise the screen-size override.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{error, info};
use terrane_backend_x11::{DeviceIntegration, X11Integration};
use terrane_core::events::WindowId;
use terrane_core::window::{ScreenSize, WindowRequest};

fn main() -> ExitCode {
    env_logger::init();

    let closed = Arc::new(AtomicBool::new(false));
    let close_flag = Arc::clone(&closed);

    // An unopenable display is fatal: nothing this backend does is
    // meaningful without one.
    let mut integration = match X11Integration::open(move |window: WindowId| {
        info!("close requested for {window:?}");
        close_flag.store(true, Ordering::Release);
    }) {
        Ok(integration) => integration,
        Err(error) => {
            error!("could not open display: {error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = run(&mut integration, &closed) {
        error!("smoke demo failed: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run<I: DeviceIntegration>(integration: &mut I, closed: &AtomicBool) -> Result<(), I::Error> {
    integration.init()?;

    let screen = integration.screen_size();
    info!("screen size: {screen:?}");

    let request = WindowRequest {
        // The backend forces fullscreen regardless; ask for something small
        // to make that visible.
        size: ScreenSize::new(640, 480),
        ..WindowRequest::default()
    };
    let window = integration.create_window(WindowId(1), &request)?;
    info!("window up, close it (or press the WM close button) to exit");

    while !closed.load(Ordering::Acquire) {
        std::thread::sleep(Duration::from_millis(50));
    }

    integration.destroy_window(window);
    integration.destroy()?;
    info!("torn down cleanly");
    Ok(())
}
