use std::ffi::NulError;

use ash::vk;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Could not load the Vulkan library: {0}")]
    Loading(#[from] ash::LoadingError),

    #[error("Could not create instance: {0}")]
    InstanceCreation(vk::Result),

    #[error("Extension entry point `{0}` is not present")]
    ExtensionNotPresent(&'static str),

    #[error("Requested layer `{0}` is not available")]
    LayerNotPresent(String),

    #[error("Name contains an interior nul byte: {0}")]
    InvalidName(#[from] NulError),

    #[error("Vulkan enumeration failed: {0}")]
    Enumeration(vk::Result),

    #[error("Could not register debug report callback: {0}")]
    DebugCallback(vk::Result),

    #[error("No physical device found")]
    NoPhysicalDevice,

    #[error("No queue family with graphics support")]
    NoGraphicsQueue,

    #[error("Graphics queue family index is not set")]
    DevicePrecondition,

    #[error("Could not create logical device: {0}")]
    DeviceCreation(vk::Result),
}

pub type RenderResult<T> = Result<T, RenderError>;
