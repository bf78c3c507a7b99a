//! Native event routing
//!
//! GLFW delivers events through a per-window receiver, which already ties
//! each event to its owning surface; this module reduces the event stream to
//! the two actions the engine reacts to. Everything else is ignored by
//! design.

use glfw::{Action, Key, WindowEvent};

/// Actions the presenter applies for a window's pending events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SurfaceEvent {
    /// Escape was pressed: mark the window close-requested. Terminal; the
    /// engine never un-requests a close.
    CloseRequested,
    /// The framebuffer changed size: update the viewport to the new pixel
    /// dimensions.
    ViewportResized(i32, i32),
}

/// Map one native event to an engine action, if any.
pub(crate) fn route_event(event: &WindowEvent) -> Option<SurfaceEvent> {
    match event {
        WindowEvent::Key(Key::Escape, _, Action::Press, _) => Some(SurfaceEvent::CloseRequested),
        WindowEvent::FramebufferSize(width, height) => {
            Some(SurfaceEvent::ViewportResized(*width, *height))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glfw::Modifiers;

    fn key_event(key: Key, action: Action) -> WindowEvent {
        WindowEvent::Key(key, 0, action, Modifiers::empty())
    }

    #[test]
    fn escape_press_requests_close() {
        assert_eq!(
            route_event(&key_event(Key::Escape, Action::Press)),
            Some(SurfaceEvent::CloseRequested)
        );
    }

    #[test]
    fn escape_release_and_repeat_are_ignored() {
        assert_eq!(route_event(&key_event(Key::Escape, Action::Release)), None);
        assert_eq!(route_event(&key_event(Key::Escape, Action::Repeat)), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(route_event(&key_event(Key::Space, Action::Press)), None);
        assert_eq!(route_event(&key_event(Key::Q, Action::Press)), None);
    }

    #[test]
    fn framebuffer_resize_updates_viewport() {
        assert_eq!(
            route_event(&WindowEvent::FramebufferSize(1280, 720)),
            Some(SurfaceEvent::ViewportResized(1280, 720))
        );
    }

    #[test]
    fn unrelated_events_are_ignored() {
        assert_eq!(route_event(&WindowEvent::Size(640, 480)), None);
        assert_eq!(route_event(&WindowEvent::Focus(true)), None);
        assert_eq!(route_event(&WindowEvent::Close), None);
    }

    /// Two windows' event streams are separate receivers: routing one
    /// window's events must produce actions for that window only.
    #[test]
    fn routing_keeps_per_window_streams_isolated() {
        let window_a_events = [WindowEvent::FramebufferSize(800, 800)];
        let window_b_events = [
            WindowEvent::FramebufferSize(1200, 1200),
            key_event(Key::Escape, Action::Press),
        ];

        let actions_a: Vec<_> = window_a_events.iter().filter_map(route_event).collect();
        let actions_b: Vec<_> = window_b_events.iter().filter_map(route_event).collect();

        assert_eq!(actions_a, vec![SurfaceEvent::ViewportResized(800, 800)]);
        assert_eq!(
            actions_b,
            vec![
                SurfaceEvent::ViewportResized(1200, 1200),
                SurfaceEvent::CloseRequested,
            ]
        );
    }
}
