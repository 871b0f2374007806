use tracing::{info, trace};
use winit::{
    event::{
        ElementState, KeyEvent,
        WindowEvent::{self, *},
    },
    event_loop::EventLoopWindowTarget,
    keyboard::{Key, ModifiersState, NamedKey},
};

/// Escape or a close request.
pub fn should_exit(event: &WindowEvent) -> bool {
    matches!(
        event,
        CloseRequested
            | KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    logical_key: Key::Named(NamedKey::Escape),
                    ..
                },
                ..
            }
    )
}

pub fn handle_window_event(
    modifiers: &mut ModifiersState,
    event: &WindowEvent,
    elwt: &EventLoopWindowTarget<()>,
) {
    if should_exit(event) {
        elwt.exit();
        info!("Requested close: Exiting window");
        return;
    }

    match event {
        ModifiersChanged(new) => {
            *modifiers = new.state();
        }
        Resized(size) => trace!("Resized to {}x{}", size.width, size.height),
        Destroyed => info!("Window destroyed"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_exits() {
        assert!(should_exit(&CloseRequested));
    }

    #[test]
    fn other_events_keep_running() {
        assert!(!should_exit(&Focused(true)));
        assert!(!should_exit(&RedrawRequested));
        assert!(!should_exit(&Destroyed));
    }
}
