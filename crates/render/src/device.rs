use ash::{prelude::VkResult, vk, Device, Instance};
use tracing::{debug, info};

use crate::{
    error::{RenderError, RenderResult},
    utils::vk_to_str,
};

/// The instance-level queries device selection needs.
pub trait DeviceSource {
    type Device;

    fn physical_devices(&self) -> VkResult<Vec<vk::PhysicalDevice>>;

    fn properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties;

    fn queue_families(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties>;

    /// # Safety
    ///
    /// `device` must come from [`DeviceSource::physical_devices`] and
    /// `create_info` must point to valid queue create infos.
    unsafe fn create_device(
        &self,
        device: vk::PhysicalDevice,
        create_info: &vk::DeviceCreateInfo,
    ) -> VkResult<Self::Device>;

    /// # Safety
    ///
    /// `family` must be one of the families `device` was created with.
    unsafe fn device_queue(&self, device: &Self::Device, family: u32, index: u32) -> vk::Queue;
}

impl DeviceSource for Instance {
    type Device = Device;

    fn physical_devices(&self) -> VkResult<Vec<vk::PhysicalDevice>> {
        unsafe { self.enumerate_physical_devices() }
    }

    fn properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties {
        unsafe { self.get_physical_device_properties(device) }
    }

    fn queue_families(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties> {
        unsafe { self.get_physical_device_queue_family_properties(device) }
    }

    unsafe fn create_device(
        &self,
        device: vk::PhysicalDevice,
        create_info: &vk::DeviceCreateInfo,
    ) -> VkResult<Device> {
        Instance::create_device(self, device, create_info, None)
    }

    unsafe fn device_queue(&self, device: &Device, family: u32, index: u32) -> vk::Queue {
        device.get_device_queue(family, index)
    }
}

/// Picks the first discrete GPU, falling back to the first enumerated device.
pub fn select_physical_device<S: DeviceSource>(source: &S) -> RenderResult<vk::PhysicalDevice> {
    let physical_devices = source.physical_devices().map_err(RenderError::Enumeration)?;

    info!("Found {} devices with vulkan support", physical_devices.len());

    let first = *physical_devices.first().ok_or(RenderError::NoPhysicalDevice)?;

    let selected = physical_devices
        .iter()
        .copied()
        .find(|device| {
            source.properties(*device).device_type == vk::PhysicalDeviceType::DISCRETE_GPU
        })
        .unwrap_or(first);

    let props = source.properties(selected);
    info!(
        "Selected {} ({:?})",
        vk_to_str(&props.device_name),
        props.device_type
    );

    Ok(selected)
}

/// Index of the first queue family with graphics support.
pub fn find_graphics_queue_family(families: &[vk::QueueFamilyProperties]) -> RenderResult<u32> {
    families
        .iter()
        .position(|family| family.queue_flags.contains(vk::QueueFlags::GRAPHICS))
        .map(|index| index as u32)
        .ok_or(RenderError::NoGraphicsQueue)
}

pub fn graphics_queue_family<S: DeviceSource>(
    source: &S,
    device: vk::PhysicalDevice,
) -> RenderResult<u32> {
    let families = source.queue_families(device);
    let index = find_graphics_queue_family(&families)?;
    debug!("Graphics queue family {index} of {}", families.len());
    Ok(index)
}

pub struct DeviceQueue<D> {
    pub device: D,
    pub queue: vk::Queue,
    pub family_index: u32,
}

/// Creates a device with a single queue of priority 0.0 from `queue_family`.
///
/// Fails with [`RenderError::DevicePrecondition`] without touching the driver
/// when no queue family has been discovered yet.
pub fn create_logical_device<S: DeviceSource>(
    source: &S,
    physical_device: vk::PhysicalDevice,
    queue_family: Option<u32>,
) -> RenderResult<DeviceQueue<S::Device>> {
    let family_index = queue_family.ok_or(RenderError::DevicePrecondition)?;

    let priorities = [0.0_f32];
    let queue_info = [vk::DeviceQueueCreateInfo::builder()
        .queue_family_index(family_index)
        .queue_priorities(&priorities)
        .build()];

    let device_info = vk::DeviceCreateInfo::builder().queue_create_infos(&queue_info);

    let device = unsafe { source.create_device(physical_device, &device_info) }
        .map_err(RenderError::DeviceCreation)?;
    let queue = unsafe { source.device_queue(&device, family_index, 0) };

    info!("Created logical device on queue family {family_index}");

    Ok(DeviceQueue {
        device,
        queue,
        family_index,
    })
}

/// Logical device destroyed on drop.
pub struct LogicalDevice {
    device: Device,
    queue: vk::Queue,
    family_index: u32,
}

impl LogicalDevice {
    pub fn new(
        instance: &Instance,
        physical: vk::PhysicalDevice,
        queue_family: Option<u32>,
    ) -> RenderResult<Self> {
        let DeviceQueue {
            device,
            queue,
            family_index,
        } = create_logical_device(instance, physical, queue_family)?;

        Ok(Self {
            device,
            queue,
            family_index,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> vk::Queue {
        self.queue
    }

    pub fn family_index(&self) -> u32 {
        self.family_index
    }
}

impl Drop for LogicalDevice {
    fn drop(&mut self) {
        unsafe { self.device.destroy_device(None) };
        debug!("Destroyed logical device");
    }
}
