/// An error type for image and kernel shapes.
///
/// Every filtering precondition is a shape precondition, so this is the only
/// error the workspace produces. All variants are raised before any pixel is
/// computed.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ShapeError {
    /// The image shape has a rank other than 2 `(H, W)` or 3 `(H, W, C)`.
    #[error("Image must be of rank 2 (H, W) or 3 (H, W, C), got rank {0}")]
    InvalidImageRank(usize),

    /// The image has a zero height, width or channel count.
    #[error("Image dimensions must be non-zero")]
    ZeroSizedImage,

    /// The buffer length does not match the product of the shape.
    #[error("Data length ({actual}) does not match the expected length ({expected})")]
    InvalidDataLength {
        /// Number of elements implied by the shape.
        expected: usize,
        /// Number of elements in the provided buffer.
        actual: usize,
    },

    /// The number of elements implied by a shape does not fit in `usize`.
    #[error("Shape {0:?} is too large to be addressed")]
    ShapeOverflow(Vec<usize>),

    /// The kernel is not a non-empty square rank-2 matrix.
    #[error("Kernel must be a non-empty square 2D array, got shape {0:?}")]
    InvalidKernelShape(Vec<usize>),

    /// The requested channel does not exist.
    #[error("Channel index {0} is out of bounds for an image with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Two images that must share a shape do not.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        /// The shape required by the operation.
        expected: Vec<usize>,
        /// The shape that was provided.
        actual: Vec<usize>,
    },

    /// The padded destination does not match the source size plus padding.
    #[error("Padded image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    PaddedSizeMismatch(usize, usize, usize, usize),
}
