pub use crate::application::Application;
pub use crate::pacing::DEFAULT_DELAY;
pub use render::{ContextConfig, GraphicsContext};
pub use window::{
    events::handle_window_event, GraphicsWindow, Window, WindowConfig, WindowHandler,
};
pub use window::winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::ModifiersState,
};
