use std::ffi::{c_char, c_void, CStr};

use ash::{extensions::ext::DebugReport, vk, Entry, Instance};
use tracing::{debug, error, info, warn, Level};

use crate::error::{RenderError, RenderResult};

const CREATE_CALLBACK: &CStr = c"vkCreateDebugReportCallbackEXT";
const DESTROY_CALLBACK: &CStr = c"vkDestroyDebugReportCallbackEXT";

/// Registered debug report callback. Must be dropped before the instance it
/// was created from.
pub struct DebugReporter {
    loader: DebugReport,
    callback: vk::DebugReportCallbackEXT,
}

impl DebugReporter {
    pub fn new(entry: &Entry, instance: &Instance) -> RenderResult<Self> {
        resolve_entry_points(|name| unsafe {
            entry
                .get_instance_proc_addr(instance.handle(), name.as_ptr())
                .is_some()
        })?;

        let loader = DebugReport::new(entry, instance);
        let create_info = populate_debug_report_create_info();

        let callback = unsafe { loader.create_debug_report_callback(&create_info, None) }
            .map_err(RenderError::DebugCallback)?;

        info!("Registered debug report callback");

        Ok(Self { loader, callback })
    }
}

impl Drop for DebugReporter {
    fn drop(&mut self) {
        unsafe { self.loader.destroy_debug_report_callback(self.callback, None) };
        debug!("Destroyed debug report callback");
    }
}

/// Checks that both debug report entry points can be resolved.
pub fn resolve_entry_points<F>(resolve: F) -> RenderResult<()>
where
    F: Fn(&CStr) -> bool,
{
    for (name, label) in [
        (CREATE_CALLBACK, "vkCreateDebugReportCallbackEXT"),
        (DESTROY_CALLBACK, "vkDestroyDebugReportCallbackEXT"),
    ] {
        if !resolve(name) {
            return Err(RenderError::ExtensionNotPresent(label));
        }
    }
    Ok(())
}

#[inline(never)]
pub fn populate_debug_report_create_info() -> vk::DebugReportCallbackCreateInfoEXT {
    *vk::DebugReportCallbackCreateInfoEXT::builder()
        .flags(vk::DebugReportFlagsEXT::ERROR | vk::DebugReportFlagsEXT::WARNING)
        .pfn_callback(Some(vulkan_debug_report_callback))
}

pub fn severity(flags: vk::DebugReportFlagsEXT) -> Level {
    if flags.contains(vk::DebugReportFlagsEXT::ERROR) {
        Level::ERROR
    } else if flags.intersects(
        vk::DebugReportFlagsEXT::WARNING | vk::DebugReportFlagsEXT::PERFORMANCE_WARNING,
    ) {
        Level::WARN
    } else if flags.contains(vk::DebugReportFlagsEXT::INFORMATION) {
        Level::INFO
    } else {
        Level::DEBUG
    }
}

unsafe fn lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

unsafe extern "system" fn vulkan_debug_report_callback(
    flags: vk::DebugReportFlagsEXT,
    _object_type: vk::DebugReportObjectTypeEXT,
    _object: u64,
    _location: usize,
    message_code: i32,
    p_layer_prefix: *const c_char,
    p_message: *const c_char,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    let prefix = lossy(p_layer_prefix);
    let message = lossy(p_message);

    let level = severity(flags);
    if level == Level::ERROR {
        error!(target: "validation", "[{prefix}] ({message_code}) {message}");
    } else if level == Level::WARN {
        warn!(target: "validation", "[{prefix}] ({message_code}) {message}");
    } else {
        debug!(target: "validation", "[{prefix}] ({message_code}) {message}");
    }

    vk::FALSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_error_or_warning() {
        let info = populate_debug_report_create_info();
        assert_eq!(
            info.flags,
            vk::DebugReportFlagsEXT::ERROR | vk::DebugReportFlagsEXT::WARNING
        );
        assert!(info.pfn_callback.is_some());
    }

    #[test]
    fn severity_mapping() {
        assert_eq!(severity(vk::DebugReportFlagsEXT::ERROR), Level::ERROR);
        assert_eq!(
            severity(vk::DebugReportFlagsEXT::ERROR | vk::DebugReportFlagsEXT::WARNING),
            Level::ERROR
        );
        assert_eq!(severity(vk::DebugReportFlagsEXT::WARNING), Level::WARN);
        assert_eq!(
            severity(vk::DebugReportFlagsEXT::PERFORMANCE_WARNING),
            Level::WARN
        );
        assert_eq!(severity(vk::DebugReportFlagsEXT::INFORMATION), Level::INFO);
        assert_eq!(severity(vk::DebugReportFlagsEXT::DEBUG), Level::DEBUG);
    }

    #[test]
    fn missing_destroy_entry_point() {
        let res = resolve_entry_points(|name| name == CREATE_CALLBACK);
        assert!(matches!(
            res,
            Err(RenderError::ExtensionNotPresent("vkDestroyDebugReportCallbackEXT"))
        ));
    }

    #[test]
    fn missing_create_entry_point_is_checked_first() {
        let res = resolve_entry_points(|_| false);
        assert!(matches!(
            res,
            Err(RenderError::ExtensionNotPresent("vkCreateDebugReportCallbackEXT"))
        ));
    }

    #[test]
    fn both_entry_points_present() {
        assert!(resolve_entry_points(|_| true).is_ok());
    }
}
