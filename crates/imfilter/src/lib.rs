#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use imfilter_image as image;

#[doc(inline)]
pub use imfilter_imgproc as imgproc;
