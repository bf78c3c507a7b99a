//! Windowed smoke test for the multi-window presentation scenario.
//!
//! Needs a display and an OpenGL 3.3 driver, so it is ignored by default:
//!
//! ```sh
//! cargo test -p pixelview -- --ignored
//! ```

use pixelview::{Frame, WindowSystem};

fn solid_rgba(r: u8, g: u8, b: u8, width: u32, height: u32) -> Vec<u8> {
    [r, g, b, 255u8].repeat((width * height) as usize)
}

/// Three windows of different sizes present solid red/green/blue frames for
/// 60 ticks; a close request on one window then sets the exit flag without
/// disturbing the others; finally the windows drop in non-creation order.
/// The shared resources must survive until the last window is gone and the
/// whole run must not panic.
#[test]
#[ignore = "requires a display and an OpenGL 3.3 driver"]
fn three_windows_present_sixty_ticks() {
    let mut system = WindowSystem::init().expect("GLFW must initialize");

    let mut first = system
        .create_window("red", 800, 800, false)
        .expect("first window");
    let mut second = system
        .create_window("green", 1200, 1200, false)
        .expect("second window");
    let mut third = system
        .create_window("blue", 1440, 1440, false)
        .expect("third window");

    let (frame_width, frame_height) = (320, 180);
    let red = solid_rgba(255, 0, 0, frame_width, frame_height);
    let green = solid_rgba(0, 255, 0, frame_width, frame_height);
    let blue = solid_rgba(0, 0, 255, frame_width, frame_height);

    let mut exit_requested = false;

    for _ in 0..60 {
        let frame = Frame::from_rgba(&red, frame_width, frame_height).unwrap();
        first.present(&frame, &mut exit_requested);

        let frame = Frame::from_rgba(&green, frame_width, frame_height).unwrap();
        second.present(&frame, &mut exit_requested);

        let frame = Frame::from_rgba(&blue, frame_width, frame_height).unwrap();
        third.present(&frame, &mut exit_requested);
    }

    assert!(
        !exit_requested,
        "no window was asked to close during the ticks"
    );

    // A close-requested window must set the exit flag instead of drawing.
    first.request_close();
    let frame = Frame::from_rgba(&red, frame_width, frame_height).unwrap();
    first.present(&frame, &mut exit_requested);
    assert!(exit_requested, "present on a closing window sets the flag");
    assert!(first.close_requested());

    // The other windows are unaffected and keep presenting normally.
    let mut others_exit = false;
    let frame = Frame::from_rgba(&green, frame_width, frame_height).unwrap();
    second.present(&frame, &mut others_exit);
    let frame = Frame::from_rgba(&blue, frame_width, frame_height).unwrap();
    third.present(&frame, &mut others_exit);
    assert!(!others_exit, "close state must stay per-window");
    assert!(!second.close_requested());
    assert!(!third.close_requested());

    // Dropping the system first must not disturb the windows, and windows
    // dropping in non-creation order must still tear down cleanly.
    drop(system);
    drop(second);
    drop(first);
    drop(third);
}
