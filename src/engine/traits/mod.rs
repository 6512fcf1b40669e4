// ABOUTME: Composable capability traits for container engines.
// ABOUTME: ContainerOps, LogOps, ImageOps, SystemOps and the EngineBackend umbrella.

mod container;
mod image;
mod logs;
mod system;

pub use container::ContainerOps;
pub use image::ImageOps;
pub use logs::LogOps;
pub use system::SystemOps;

/// Everything a caller needs from an engine.
///
/// Implemented automatically for any type providing every capability, so a
/// second engine only has to implement the individual traits.
pub trait EngineBackend: ContainerOps + LogOps + ImageOps + SystemOps {}

impl<T> EngineBackend for T where T: ContainerOps + LogOps + ImageOps + SystemOps {}
