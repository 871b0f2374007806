use std::ffi::CStr;

use tracing::{debug, info};
use winit::{
    dpi::LogicalSize,
    event_loop::EventLoopWindowTarget,
    raw_window_handle::HasDisplayHandle,
    window::{Window as WinitWindow, WindowBuilder},
};

use crate::{error::WindowResult, raw_handle::enumerate_required_extensions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            resizable: true,
            visible: true,
        }
    }
}

/// Creates and destroys native windows for one backend. Holds no handles.
pub trait WindowHandler {
    /// Whatever the backend needs to be initialized before windows exist.
    type Target: ?Sized;
    type Handle;

    fn create_window(&self, target: &Self::Target, title: &str) -> WindowResult<Self::Handle>;

    fn destroy_window(&self, handle: Self::Handle);
}

/// A backend whose windows can be presented to with Vulkan.
pub trait SurfaceHandler: WindowHandler {
    fn required_extensions(&self, handle: &Self::Handle) -> WindowResult<Vec<&'static CStr>>;
}

/// Desktop backend on top of winit.
#[derive(Debug, Default)]
pub struct WinitHandler {
    config: WindowConfig,
}

impl WinitHandler {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }
}

impl WindowHandler for WinitHandler {
    type Target = EventLoopWindowTarget<()>;
    type Handle = WinitWindow;

    fn create_window(&self, target: &Self::Target, title: &str) -> WindowResult<WinitWindow> {
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(self.config.resizable)
            .with_visible(self.config.visible)
            .build(target)?;

        info!(
            "Created window {:?} \"{title}\" ({}x{})",
            window.id(),
            self.config.width,
            self.config.height
        );
        Ok(window)
    }

    fn destroy_window(&self, handle: WinitWindow) {
        debug!("Destroying window {:?}", handle.id());
        drop(handle);
    }
}

impl SurfaceHandler for WinitHandler {
    fn required_extensions(&self, handle: &WinitWindow) -> WindowResult<Vec<&'static CStr>> {
        enumerate_required_extensions(handle.display_handle()?)
    }
}
