#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// image representation for filtering purposes.
pub mod image;

/// convolution kernel representation.
pub mod kernel;

pub use crate::error::ShapeError;
pub use crate::image::{Image, ImageSize};
pub use crate::kernel::Kernel;
