//! Pixelview demo application
//!
//! Opens three windows of different sizes and presents a solid-color RGBA
//! buffer to each one every loop tick. Press escape in any window (or close
//! it) to stop the loop.

use pixelview::{Frame, WindowSystem};

const FRAME_WIDTH: u32 = 1600;
const FRAME_HEIGHT: u32 = 900;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting pixelview demo");

    let mut system = WindowSystem::init()?;

    let mut window = system.create_window("test window", 400, 400, true)?;
    let mut window2 = system.create_window("test window 2", 600, 600, true)?;
    let mut window3 = system.create_window("test window 3", 720, 720, true)?;

    let buffer_len = (FRAME_WIDTH * FRAME_HEIGHT) as usize * 4;
    let white = vec![255u8; buffer_len];
    let gray = vec![128u8; buffer_len];
    let dark = vec![34u8; buffer_len];

    let mut exit_requested = false;

    // Press ESC in any window to stop.
    while !exit_requested {
        let frame = Frame::from_rgba(&white, FRAME_WIDTH, FRAME_HEIGHT)?;
        window.present(&frame, &mut exit_requested);

        let frame = Frame::from_rgba(&gray, FRAME_WIDTH, FRAME_HEIGHT)?;
        window2.present(&frame, &mut exit_requested);

        let frame = Frame::from_rgba(&dark, FRAME_WIDTH, FRAME_HEIGHT)?;
        window3.present(&frame, &mut exit_requested);
    }

    log::info!("Exit requested, shutting down");

    Ok(())
}
