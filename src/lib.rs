pub mod application;
pub mod pacing;
pub mod prelude;

pub use render;
pub use window;
