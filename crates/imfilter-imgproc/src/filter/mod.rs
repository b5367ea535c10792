//! Filter operations
//!
//! This module provides the 2D convolution of an image with a square kernel.

/// 2D convolution operations
mod convolution;
pub use convolution::*;

/// Filter options
mod options;
pub use options::*;
