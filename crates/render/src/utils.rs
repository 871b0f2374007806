use std::{
    borrow::Cow,
    ffi::{c_char, CStr, CString},
};

use ash::{vk, Entry};
use tracing::debug;

use crate::error::{RenderError, RenderResult};

pub const VALIDATION_LAYERS: [&str; 1] = ["VK_LAYER_KHRONOS_validation"];

/// Reads a fixed size, nul terminated name array as returned by the driver.
pub fn vk_to_str(raw: &[c_char]) -> Cow<'_, str> {
    // SAFETY: a c_char slice has the same layout as a byte slice
    let bytes = unsafe { std::slice::from_raw_parts(raw.as_ptr().cast::<u8>(), raw.len()) };

    match CStr::from_bytes_until_nul(bytes) {
        Ok(s) => s.to_string_lossy(),
        Err(_) => String::from_utf8_lossy(bytes),
    }
}

/// Drops repeated names, keeping the first occurrence of each.
pub fn dedup_names<I>(names: I) -> Vec<CString>
where
    I: IntoIterator<Item = CString>,
{
    let mut res: Vec<CString> = Vec::new();
    for name in names {
        if !res.contains(&name) {
            res.push(name);
        }
    }
    res
}

pub fn to_cstrings<S: AsRef<str>>(names: &[S]) -> RenderResult<Vec<CString>> {
    names
        .iter()
        .map(|s| CString::new(s.as_ref()).map_err(RenderError::from))
        .collect()
}

/// Returns the first requested layer that is missing from `available`.
pub fn find_missing_layer<'a>(
    available: &[vk::LayerProperties],
    requested: &'a [CString],
) -> Option<&'a CString> {
    requested.iter().find(|layer| {
        !available
            .iter()
            .any(|p| vk_to_str(&p.layer_name) == layer.to_string_lossy())
    })
}

pub fn check_validation_layer_support(entry: &Entry, requested: &[CString]) -> RenderResult<()> {
    let layer_properties = entry
        .enumerate_instance_layer_properties()
        .map_err(RenderError::Enumeration)?;

    debug!("instance available layers: ");
    for layer in &layer_properties {
        debug!("\t {}", vk_to_str(&layer.layer_name));
    }

    match find_missing_layer(&layer_properties, requested) {
        Some(missing) => Err(RenderError::LayerNotPresent(
            missing.to_string_lossy().into_owned(),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) fn name_array<const N: usize>(name: &str) -> [c_char; N] {
    let mut out = [0 as c_char; N];
    for (dst, src) in out.iter_mut().zip(name.bytes()) {
        *dst = src as c_char;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str) -> vk::LayerProperties {
        vk::LayerProperties {
            layer_name: name_array(name),
            ..Default::default()
        }
    }

    #[test]
    fn vk_to_str_stops_at_nul() {
        let raw: [c_char; 16] = name_array("VK_KHR_surface");
        assert_eq!(vk_to_str(&raw), "VK_KHR_surface");
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let names = to_cstrings(&["b", "a", "b", "c", "a"]).unwrap();
        let deduped = dedup_names(names);
        assert_eq!(deduped, to_cstrings(&["b", "a", "c"]).unwrap());
    }

    #[test]
    fn to_cstrings_rejects_interior_nul() {
        let res = to_cstrings(&["ok", "bad\0name"]);
        assert!(matches!(res, Err(RenderError::InvalidName(_))));
    }

    #[test]
    fn missing_layer_is_reported() {
        let available = [layer("VK_LAYER_LUNARG_monitor")];
        let requested = to_cstrings(&VALIDATION_LAYERS).unwrap();
        let missing = find_missing_layer(&available, &requested);
        assert_eq!(
            missing.map(|s| s.to_str().unwrap()),
            Some("VK_LAYER_KHRONOS_validation")
        );
    }

    #[test]
    fn all_layers_present() {
        let available = [
            layer("VK_LAYER_LUNARG_monitor"),
            layer("VK_LAYER_KHRONOS_validation"),
        ];
        let requested = to_cstrings(&VALIDATION_LAYERS).unwrap();
        assert!(find_missing_layer(&available, &requested).is_none());
        assert!(find_missing_layer(&available, &[]).is_none());
    }
}
