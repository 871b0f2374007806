use std::{rc::Rc, time::Duration};

use anyhow::{Context, Result};
use tracing::info;
use window::{
    winit::event_loop::{EventLoop, EventLoopWindowTarget},
    GraphicsWindow, Window, WindowConfig, WindowResult, WinitHandler,
};

use crate::pacing::{self, DEFAULT_DELAY};

/// Owns the windowing subsystem and hands out windows bound to it.
pub struct Application {
    handler: Rc<WinitHandler>,
    event_loop: EventLoop<()>,
}

impl Application {
    /// Initializes the windowing subsystem. Only one per process.
    pub fn new() -> WindowResult<Self> {
        Self::with_config(WindowConfig::default())
    }

    pub fn with_config(config: WindowConfig) -> WindowResult<Self> {
        let event_loop = EventLoop::new()?;
        info!("Windowing subsystem initialized");

        Ok(Self {
            handler: Rc::new(WinitHandler::new(config)),
            event_loop,
        })
    }

    fn target(&self) -> &EventLoopWindowTarget<()> {
        &self.event_loop
    }

    pub fn create_window(&self, title: &str) -> WindowResult<Window<WinitHandler>> {
        Window::new(self.handler.clone(), self.target(), title)
    }

    pub fn create_graphics_window(&self, title: &str) -> Result<GraphicsWindow<WinitHandler>> {
        let entry = render::load_entry().context("Vulkan is not available")?;
        let window = GraphicsWindow::new(self.handler.clone(), self.target(), title, entry)
            .with_context(|| format!("Could not create graphics window \"{title}\""))?;
        Ok(window)
    }

    /// Sleeps for `delay`, then calls `predicate` once with the event loop. The
    /// predicate is responsible for draining pending events.
    pub fn poll<F>(&mut self, predicate: F, delay: Duration) -> bool
    where
        F: FnOnce(&mut EventLoop<()>) -> bool,
    {
        let event_loop = &mut self.event_loop;
        pacing::step(delay, || predicate(event_loop))
    }

    /// Polls at [`DEFAULT_DELAY`] until the predicate returns `false`.
    pub fn run<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&mut EventLoop<()>) -> bool,
    {
        let event_loop = &mut self.event_loop;
        let cycles = pacing::run(DEFAULT_DELAY, || predicate(event_loop));
        info!("Main loop finished after {cycles} cycles");
    }
}
