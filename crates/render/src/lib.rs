mod config;
mod debug;
mod device;
mod error;
mod instance;
mod resources;
pub mod utils;

use std::ffi::CString;

pub use ash::{self, vk, Entry};
pub use config::ContextConfig;
pub use debug::DebugReporter;
pub use device::{
    create_logical_device, find_graphics_queue_family, graphics_queue_family,
    select_physical_device, DeviceQueue, DeviceSource, LogicalDevice,
};
pub use error::{RenderError, RenderResult};
pub use instance::OwnedInstance;
pub use resources::{bootstrap, Resources};
use tracing::info;

/// Loads the system Vulkan loader.
pub fn load_entry() -> RenderResult<Entry> {
    let entry = unsafe { Entry::load() }?;
    Ok(entry)
}

/// Instance, optional debug report, selected physical device and, once
/// requested, the logical device with its graphics queue.
pub struct GraphicsContext {
    resources: Resources<Entry, OwnedInstance, DebugReporter, LogicalDevice>,
    physical_device: vk::PhysicalDevice,
    graphics_queue_family: Option<u32>,
}

impl GraphicsContext {
    /// Creates the instance, registers the debug report callback, selects a
    /// physical device and finds its graphics queue family.
    ///
    /// Anything created before a failing step is released before returning.
    pub fn new(
        entry: Entry,
        extensions: &[CString],
        config: &ContextConfig,
    ) -> RenderResult<Self> {
        let (resources, (physical_device, graphics_queue_family)) = bootstrap(
            entry,
            |entry: &Entry| instance::init(entry, config, extensions),
            |entry: &Entry, instance: &OwnedInstance| {
                config
                    .debug_report
                    .then(|| DebugReporter::new(entry, instance))
                    .transpose()
            },
            |instance: &OwnedInstance| {
                let physical = select_physical_device(&**instance)?;
                let family = graphics_queue_family(&**instance, physical)?;
                Ok((physical, family))
            },
        )?;

        Ok(Self {
            resources,
            physical_device,
            graphics_queue_family: Some(graphics_queue_family),
        })
    }

    /// Creates the logical device and its graphics queue, or returns the one
    /// already created.
    pub fn create_device(&mut self) -> RenderResult<&LogicalDevice> {
        let physical_device = self.physical_device;
        let queue_family = self.graphics_queue_family;

        self.resources.device_or_try_insert(|instance| {
            LogicalDevice::new(instance, physical_device, queue_family)
        })
    }

    pub fn entry(&self) -> &Entry {
        self.resources.loader()
    }

    pub fn instance(&self) -> &ash::Instance {
        self.resources.instance()
    }

    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    pub fn graphics_queue_family(&self) -> Option<u32> {
        self.graphics_queue_family
    }

    pub fn device(&self) -> Option<&LogicalDevice> {
        self.resources.device()
    }

    pub fn has_debug_report(&self) -> bool {
        self.resources.reporter().is_some()
    }
}

impl Drop for GraphicsContext {
    fn drop(&mut self) {
        info!("Tearing down graphics context");
    }
}
