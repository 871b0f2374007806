use std::{
    ffi::{c_char, CString},
    ops::Deref,
};

use ash::{extensions::ext::DebugReport, vk, Entry, Instance};
use tracing::{debug, info};

use crate::{
    config::ContextConfig,
    debug::populate_debug_report_create_info,
    error::{RenderError, RenderResult},
    utils::{check_validation_layer_support, dedup_names, to_cstrings},
};

/// Instance that is destroyed when dropped.
pub struct OwnedInstance {
    instance: Instance,
}

impl Deref for OwnedInstance {
    type Target = Instance;

    fn deref(&self) -> &Instance {
        &self.instance
    }
}

impl Drop for OwnedInstance {
    fn drop(&mut self) {
        unsafe { self.instance.destroy_instance(None) };
        debug!("Destroyed instance");
    }
}

/// Final extension and layer lists handed to `vkCreateInstance`.
pub fn instance_names(
    config: &ContextConfig,
    extensions: &[CString],
) -> RenderResult<(Vec<CString>, Vec<CString>)> {
    let mut ext = extensions.to_vec();
    if config.debug_report {
        ext.push(DebugReport::name().to_owned());
    }

    let layers = if config.validation {
        to_cstrings(&config.layers)?
    } else {
        vec![]
    };

    Ok((dedup_names(ext), dedup_names(layers)))
}

pub fn init(
    entry: &Entry,
    config: &ContextConfig,
    extensions: &[CString],
) -> RenderResult<OwnedInstance> {
    let (extensions, layers) = instance_names(config, extensions)?;

    if !layers.is_empty() {
        check_validation_layer_support(entry, &layers)?;
    }

    let app_name = CString::new(config.application_name.as_str())?;
    let engine_name = CString::new("huigame")?;

    let major = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    let patch = env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0);

    let app_info = vk::ApplicationInfo::builder()
        .application_name(&app_name)
        .engine_name(&engine_name)
        .engine_version(vk::make_api_version(0, major, minor, patch))
        .api_version(vk::API_VERSION_1_0);

    let ext_ptrs: Vec<*const c_char> = extensions.iter().map(|s| s.as_ptr()).collect();
    let layer_ptrs: Vec<*const c_char> = layers.iter().map(|s| s.as_ptr()).collect();

    // chained so validation output is captured during vkCreateInstance itself
    let mut debug_info = populate_debug_report_create_info();

    let mut create_info = vk::InstanceCreateInfo::builder()
        .flags(vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR)
        .application_info(&app_info)
        .enabled_extension_names(&ext_ptrs)
        .enabled_layer_names(&layer_ptrs);

    if config.debug_report {
        create_info = create_info.push_next(&mut debug_info);
    }

    let instance = unsafe { entry.create_instance(&create_info, None) }
        .map_err(RenderError::InstanceCreation)?;

    info!(
        "Created instance with {} extensions and {} layers",
        extensions.len(),
        layers.len()
    );
    for name in &extensions {
        debug!("\t extension {}", name.to_string_lossy());
    }

    Ok(OwnedInstance { instance })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[CString]) -> Vec<&str> {
        v.iter().map(|s| s.to_str().unwrap()).collect()
    }

    #[test]
    fn debug_report_extension_is_appended_once() {
        let config = ContextConfig {
            debug_report: true,
            validation: true,
            ..Default::default()
        };
        let requested = to_cstrings(&["VK_KHR_surface", "VK_EXT_debug_report", "VK_KHR_surface"])
            .unwrap();

        let (ext, layers) = instance_names(&config, &requested).unwrap();
        assert_eq!(names(&ext), ["VK_KHR_surface", "VK_EXT_debug_report"]);
        assert_eq!(names(&layers), ["VK_LAYER_KHRONOS_validation"]);
    }

    #[test]
    fn empty_lists_stay_empty_without_diagnostics() {
        let (ext, layers) = instance_names(&ContextConfig::quiet(), &[]).unwrap();
        assert!(ext.is_empty());
        assert!(layers.is_empty());
    }

    #[test]
    fn duplicate_layers_are_dropped() {
        let config = ContextConfig {
            validation: true,
            debug_report: false,
            layers: vec![
                "VK_LAYER_KHRONOS_validation".into(),
                "VK_LAYER_KHRONOS_validation".into(),
            ],
            ..Default::default()
        };
        let (_, layers) = instance_names(&config, &[]).unwrap();
        assert_eq!(names(&layers), ["VK_LAYER_KHRONOS_validation"]);
    }
}
