pub mod events;
mod error;
mod handler;
mod raw_handle;

use std::{
    ffi::{CStr, CString},
    ops::{Deref, DerefMut},
    rc::Rc,
};

use ash::{vk, Entry};
use render::utils::{dedup_names, vk_to_str};
use tracing::{debug, trace};

pub use error::{WindowError, WindowResult};
pub use handler::{SurfaceHandler, WindowConfig, WindowHandler, WinitHandler};
pub use raw_handle::{enumerate_required_extensions, required_extensions_for};
pub use winit;

/// Instance extensions added to the window's own list whenever the loader has them.
pub const OPTIONAL_EXTENSIONS: [&CStr; 2] = [
    c"VK_KHR_get_physical_device_properties2",
    c"VK_KHR_portability_enumeration",
];

/// A native window. The handle is released exactly once, either by
/// [`Window::destroy`] or on drop.
pub struct Window<H: WindowHandler> {
    handler: Rc<H>,
    handle: Option<H::Handle>,
}

impl<H: WindowHandler> Window<H> {
    pub fn new(handler: Rc<H>, target: &H::Target, title: &str) -> WindowResult<Self> {
        let handle = handler.create_window(target, title)?;
        Ok(Self {
            handler,
            handle: Some(handle),
        })
    }

    /// `None` once the window has been destroyed.
    pub fn handle(&self) -> Option<&H::Handle> {
        self.handle.as_ref()
    }

    pub fn handler(&self) -> &Rc<H> {
        &self.handler
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_none()
    }

    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.handler.destroy_window(handle);
        }
    }
}

impl<H: WindowHandler> Drop for Window<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// A window that can report the instance extensions Vulkan needs to present to it.
pub struct GraphicsWindow<H: SurfaceHandler> {
    window: Window<H>,
    entry: Entry,
}

impl<H: SurfaceHandler> GraphicsWindow<H> {
    pub fn new(
        handler: Rc<H>,
        target: &H::Target,
        title: &str,
        entry: Entry,
    ) -> WindowResult<Self> {
        Ok(Self {
            window: Window::new(handler, target, title)?,
            entry,
        })
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Extensions the backend requires for this window, plus whichever of
    /// [`OPTIONAL_EXTENSIONS`] the loader offers.
    pub fn extension_names(&self) -> WindowResult<Vec<CString>> {
        let handle = self.window.handle().ok_or(WindowError::Destroyed)?;
        let required = self.window.handler().required_extensions(handle)?;
        debug!("{} extensions required by the window", required.len());

        let available = self
            .entry
            .enumerate_instance_extension_properties(None)
            .map_err(WindowError::Enumeration)?;

        Ok(merge_extensions(&required, &available))
    }
}

impl<H: SurfaceHandler> Deref for GraphicsWindow<H> {
    type Target = Window<H>;

    fn deref(&self) -> &Window<H> {
        &self.window
    }
}

impl<H: SurfaceHandler> DerefMut for GraphicsWindow<H> {
    fn deref_mut(&mut self) -> &mut Window<H> {
        &mut self.window
    }
}

pub fn merge_extensions(required: &[&CStr], available: &[vk::ExtensionProperties]) -> Vec<CString> {
    let optional = OPTIONAL_EXTENSIONS.iter().filter(|name| {
        available
            .iter()
            .any(|p| vk_to_str(&p.extension_name) == name.to_string_lossy())
    });

    let names = required
        .iter()
        .chain(optional)
        .inspect(|name| trace!("\t {}", name.to_string_lossy()))
        .map(|name| (*name).to_owned());

    dedup_names(names)
}
