use ash::vk;
use thiserror::Error;
use winit::{
    error::{EventLoopError, OsError},
    raw_window_handle::HandleError,
};

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Could not initialize the windowing subsystem: {0}")]
    SubsystemInit(#[from] EventLoopError),

    #[error("Failed to create window: {0}")]
    Creation(#[from] OsError),

    #[error("Window has already been destroyed")]
    Destroyed,

    #[error("Could not get display handle: {0}")]
    DisplayHandle(#[from] HandleError),

    #[error("Unsupported display platform")]
    UnsupportedPlatform,

    #[error("Could not enumerate instance extensions: {0}")]
    Enumeration(vk::Result),
}

pub type WindowResult<T> = Result<T, WindowError>;
