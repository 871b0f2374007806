use std::ffi::CStr;

use ash::extensions::{ext, khr};
use winit::raw_window_handle::{DisplayHandle, RawDisplayHandle};

use crate::error::{WindowError, WindowResult};

/// Query the instance extensions needed to present to a window on the given display.
///
/// The display handle can be taken from any window created on that display, the
/// result does not depend on which one.
pub fn enumerate_required_extensions(
    display_handle: DisplayHandle,
) -> WindowResult<Vec<&'static CStr>> {
    required_extensions_for(display_handle.as_raw())
}

pub fn required_extensions_for(display: RawDisplayHandle) -> WindowResult<Vec<&'static CStr>> {
    let platform = match display {
        RawDisplayHandle::Windows(_) => khr::Win32Surface::name(),
        RawDisplayHandle::Wayland(_) => khr::WaylandSurface::name(),
        RawDisplayHandle::Xlib(_) => khr::XlibSurface::name(),
        RawDisplayHandle::Xcb(_) => khr::XcbSurface::name(),
        RawDisplayHandle::Android(_) => khr::AndroidSurface::name(),
        RawDisplayHandle::AppKit(_) | RawDisplayHandle::UiKit(_) => ext::MetalSurface::name(),
        _ => return Err(WindowError::UnsupportedPlatform),
    };

    Ok(vec![khr::Surface::name(), platform])
}

#[cfg(test)]
mod tests {
    use winit::raw_window_handle::{
        AppKitDisplayHandle, WaylandDisplayHandle, WebDisplayHandle, WindowsDisplayHandle,
    };

    use super::*;

    fn names(v: Vec<&'static CStr>) -> Vec<&'static str> {
        v.into_iter().map(|s| s.to_str().unwrap()).collect()
    }

    #[test]
    fn windows_needs_win32_surface() {
        let ext = required_extensions_for(RawDisplayHandle::Windows(WindowsDisplayHandle::new()));
        assert_eq!(names(ext.unwrap()), ["VK_KHR_surface", "VK_KHR_win32_surface"]);
    }

    #[test]
    fn wayland_needs_wayland_surface() {
        let display = std::ptr::NonNull::<std::ffi::c_void>::dangling();
        let ext = required_extensions_for(RawDisplayHandle::Wayland(WaylandDisplayHandle::new(
            display,
        )));
        assert_eq!(names(ext.unwrap()), ["VK_KHR_surface", "VK_KHR_wayland_surface"]);
    }

    #[test]
    fn macos_goes_through_metal() {
        let ext = required_extensions_for(RawDisplayHandle::AppKit(AppKitDisplayHandle::new()));
        assert_eq!(names(ext.unwrap()), ["VK_KHR_surface", "VK_EXT_metal_surface"]);
    }

    #[test]
    fn web_is_unsupported() {
        let ext = required_extensions_for(RawDisplayHandle::Web(WebDisplayHandle::new()));
        assert!(matches!(ext, Err(WindowError::UnsupportedPlatform)));
    }
}
