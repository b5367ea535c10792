use crate::error::ShapeError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use imfilter_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with interleaved channels, i.e. with shape
/// `(H, W, C)`. A grayscale image built from a rank-2 shape `(H, W)` keeps its
/// rank, so operations that preserve shape hand back a rank-2 image as well,
/// but it is otherwise treated as an image with a single channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    num_channels: usize,
    channel_axis: bool,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from a shape and pixel data.
    ///
    /// # Arguments
    ///
    /// * `shape` - Either `[height, width]` or `[height, width, channels]`.
    /// * `data` - The pixel data of the image, row-major with interleaved channels.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidImageRank`] if the shape is not of rank 2 or 3,
    /// [`ShapeError::ZeroSizedImage`] if any dimension is zero and
    /// [`ShapeError::InvalidDataLength`] if the data does not fill the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use imfilter_image::Image;
    ///
    /// let gray = Image::from_shape_vec(&[2, 3], vec![0u8; 6]).unwrap();
    /// assert_eq!(gray.shape(), vec![2, 3]);
    /// assert_eq!(gray.num_channels(), 1);
    ///
    /// let rgb = Image::from_shape_vec(&[2, 3, 3], vec![0u8; 18]).unwrap();
    /// assert_eq!(rgb.shape(), vec![2, 3, 3]);
    ///
    /// assert!(Image::from_shape_vec(&[6], vec![0u8; 6]).is_err());
    /// ```
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let (height, width, num_channels, channel_axis) = match *shape {
            [height, width] => (height, width, 1, false),
            [height, width, channels] => (height, width, channels, true),
            _ => return Err(ShapeError::InvalidImageRank(shape.len())),
        };

        Self::from_parts(
            ImageSize { width, height },
            num_channels,
            channel_axis,
            data,
        )
    }

    /// Create a new multi-channel image with shape `(H, W, C)`.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `num_channels` - The number of interleaved channels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the size or channel count is zero, or the length of the pixel data does
    /// not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use imfilter_image::{Image, ImageSize};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, num_channels: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        Self::from_parts(size, num_channels, true, data)
    }

    /// Create a new single-channel image with shape `(H, W)`.
    pub fn new_gray(size: ImageSize, data: Vec<T>) -> Result<Self, ShapeError> {
        Self::from_parts(size, 1, false, data)
    }

    /// Create a new image with the given size and a constant pixel value.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `num_channels` - The number of interleaved channels.
    /// * `val` - The value of every sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use imfilter_image::{Image, ImageSize};
    ///
    /// let image = Image::from_size_val([4, 2].into(), 3, 7u8).unwrap();
    ///
    /// assert_eq!(image.shape(), vec![2, 4, 3]);
    /// assert!(image.as_slice().iter().all(|&v| v == 7));
    /// ```
    pub fn from_size_val(size: ImageSize, num_channels: usize, val: T) -> Result<Self, ShapeError>
    where
        T: Clone,
    {
        let data = vec![val; num_samples(size, num_channels)?];
        Self::new(size, num_channels, data)
    }

    /// Create an image with the same shape (and rank) as `self` filled with `val`.
    pub fn like<U: Clone>(&self, val: U) -> Image<U> {
        Image {
            size: self.size,
            num_channels: self.num_channels,
            channel_axis: self.channel_axis,
            data: vec![val; self.data.len()],
        }
    }

    /// Create an image with the given size that keeps the channel layout of `self`.
    ///
    /// # Errors
    ///
    /// If the new size has a zero dimension or is too large to address, an
    /// error is returned.
    pub fn resized_like<U: Clone>(&self, size: ImageSize, val: U) -> Result<Image<U>, ShapeError> {
        let data = vec![val; num_samples(size, self.num_channels)?];
        Image::from_parts(size, self.num_channels, self.channel_axis, data)
    }

    fn from_parts(
        size: ImageSize,
        num_channels: usize,
        channel_axis: bool,
        data: Vec<T>,
    ) -> Result<Self, ShapeError> {
        let expected = num_samples(size, num_channels)?;
        if data.len() != expected {
            return Err(ShapeError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            size,
            num_channels,
            channel_axis,
            data,
        })
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Number of axes of the image shape: 2 for `(H, W)`, 3 for `(H, W, C)`.
    pub fn rank(&self) -> usize {
        if self.channel_axis {
            3
        } else {
            2
        }
    }

    /// The shape of the image, `[H, W]` or `[H, W, C]`.
    pub fn shape(&self) -> Vec<usize> {
        if self.channel_axis {
            vec![self.size.height, self.size.width, self.num_channels]
        } else {
            vec![self.size.height, self.size.width]
        }
    }

    /// Number of samples in one row, i.e. `width * channels`.
    pub fn row_stride(&self) -> usize {
        self.size.width * self.num_channels
    }

    /// Get the pixel data of the image.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable pixel data of the image.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a sample by its `[y, x, channel]` index.
    ///
    /// Returns `None` when the index is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, c] = index;
        if y >= self.size.height || x >= self.size.width || c >= self.num_channels {
            return None;
        }
        self.data.get((y * self.size.width + x) * self.num_channels + c)
    }

    /// Allocate a new image of the same shape with every sample mapped by `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use imfilter_image::Image;
    ///
    /// let image = Image::from_shape_vec(&[1, 2], vec![1u8, 2]).unwrap();
    /// let image_f32 = image.map(|&v| v as f32 * 0.5);
    ///
    /// assert_eq!(image_f32.as_slice(), &[0.5, 1.0]);
    /// ```
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Image<U> {
        Image {
            size: self.size,
            num_channels: self.num_channels,
            channel_axis: self.channel_axis,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Get a channel of the image as a rank-2 image.
    ///
    /// # Arguments
    ///
    /// * `channel` - The channel to get.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, channel: usize) -> Result<Image<T>, ShapeError>
    where
        T: Clone,
    {
        if channel >= self.num_channels {
            return Err(ShapeError::ChannelIndexOutOfBounds(
                channel,
                self.num_channels,
            ));
        }

        let channel_data = self
            .data
            .iter()
            .skip(channel)
            .step_by(self.num_channels)
            .cloned()
            .collect();

        Image::new_gray(self.size, channel_data)
    }

    /// Split the image into its channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use imfilter_image::Image;
    ///
    /// let image = Image::from_size_val([10, 20].into(), 2, 0.0f32).unwrap();
    ///
    /// let channels = image.split_channels().unwrap();
    /// assert_eq!(channels.len(), 2);
    /// assert_eq!(channels[0].shape(), vec![20, 10]);
    /// ```
    pub fn split_channels(&self) -> Result<Vec<Image<T>>, ShapeError>
    where
        T: Clone,
    {
        (0..self.num_channels).map(|c| self.channel(c)).collect()
    }

    /// Interleave single-channel images into one `(H, W, C)` image.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ZeroSizedImage`] for an empty list and
    /// [`ShapeError::SizeMismatch`] if the planes are not single-channel images
    /// of the same size.
    pub fn stack_channels(planes: &[Image<T>]) -> Result<Image<T>, ShapeError>
    where
        T: Clone,
    {
        let first = planes.first().ok_or(ShapeError::ZeroSizedImage)?;
        let size = first.size();

        for plane in planes {
            if plane.size() != size || plane.num_channels() != 1 {
                return Err(ShapeError::SizeMismatch {
                    expected: vec![size.height, size.width],
                    actual: plane.shape(),
                });
            }
        }

        let mut data = Vec::with_capacity(size.width * size.height * planes.len());
        for i in 0..size.width * size.height {
            data.extend(planes.iter().map(|plane| plane.data[i].clone()));
        }

        Image::new(size, planes.len(), data)
    }
}

/// Number of samples in an image of `size` with `num_channels` channels.
fn num_samples(size: ImageSize, num_channels: usize) -> Result<usize, ShapeError> {
    if size.width == 0 || size.height == 0 || num_channels == 0 {
        return Err(ShapeError::ZeroSizedImage);
    }

    let overflow = || ShapeError::ShapeOverflow(vec![size.height, size.width, num_channels]);
    let pixels = size.width.checked_mul(size.height).ok_or_else(overflow)?;
    pixels.checked_mul(num_channels).ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(
            image_size.to_string(),
            "ImageSize { width: 10, height: 20 }"
        );
    }

    #[test]
    fn image_from_shape_vec() -> Result<(), ShapeError> {
        let gray = Image::from_shape_vec(&[2, 3], vec![0u8; 6])?;
        assert_eq!(gray.size(), ImageSize::from([3, 2]));
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.rank(), 2);
        assert_eq!(gray.row_stride(), 3);

        let rgb = Image::from_shape_vec(&[2, 3, 3], vec![0u8; 18])?;
        assert_eq!(rgb.num_channels(), 3);
        assert_eq!(rgb.rank(), 3);
        assert_eq!(rgb.shape(), vec![2, 3, 3]);
        assert_eq!(rgb.row_stride(), 9);

        let single = Image::from_shape_vec(&[2, 3, 1], vec![0u8; 6])?;
        assert_eq!(single.rank(), 3);
        assert_eq!(single.shape(), vec![2, 3, 1]);

        Ok(())
    }

    #[test]
    fn image_invalid_rank() {
        assert_eq!(
            Image::from_shape_vec(&[6], vec![0u8; 6]),
            Err(ShapeError::InvalidImageRank(1))
        );
        assert_eq!(
            Image::from_shape_vec(&[1, 2, 3, 1], vec![0u8; 6]),
            Err(ShapeError::InvalidImageRank(4))
        );
    }

    #[test]
    fn image_zero_sized() {
        assert_eq!(
            Image::<u8>::from_shape_vec(&[0, 3], vec![]),
            Err(ShapeError::ZeroSizedImage)
        );
        assert_eq!(
            Image::<u8>::from_shape_vec(&[2, 2, 0], vec![]),
            Err(ShapeError::ZeroSizedImage)
        );
    }

    #[test]
    fn image_invalid_data_length() {
        assert_eq!(
            Image::new([2, 2].into(), 3, vec![0u8; 11]),
            Err(ShapeError::InvalidDataLength {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn image_shape_overflow() {
        let huge = usize::MAX / 2;
        assert_eq!(
            Image::<u8>::from_shape_vec(&[huge, 3], vec![]),
            Err(ShapeError::ShapeOverflow(vec![huge, 3, 1]))
        );
        assert_eq!(
            Image::<u8>::from_shape_vec(&[2, huge, 3], vec![]),
            Err(ShapeError::ShapeOverflow(vec![2, huge, 3]))
        );
        assert_eq!(
            Image::from_size_val([huge, 2].into(), 2, 0u8),
            Err(ShapeError::ShapeOverflow(vec![2, huge, 2]))
        );
    }

    #[test]
    fn image_resized_like_overflow() -> Result<(), ShapeError> {
        let image = Image::new([2, 2].into(), 3, vec![0u8; 12])?;
        let huge = usize::MAX / 2;
        assert_eq!(
            image.resized_like([huge, huge].into(), 0.0f32),
            Err(ShapeError::ShapeOverflow(vec![huge, huge, 3]))
        );
        Ok(())
    }

    #[test]
    fn image_get() -> Result<(), ShapeError> {
        let image = Image::new([2, 1].into(), 2, vec![1u8, 2, 3, 4])?;
        assert_eq!(image.get([0, 0, 0]), Some(&1));
        assert_eq!(image.get([0, 1, 1]), Some(&4));
        assert_eq!(image.get([1, 0, 0]), None);
        assert_eq!(image.get([0, 0, 2]), None);
        Ok(())
    }

    #[test]
    fn image_channel_roundtrip() -> Result<(), ShapeError> {
        let image = Image::new([2, 1].into(), 3, vec![1u8, 2, 3, 4, 5, 6])?;

        let channels = image.split_channels()?;
        assert_eq!(channels.len(), 3);
        assert_eq!(channels[0].as_slice(), &[1, 4]);
        assert_eq!(channels[1].as_slice(), &[2, 5]);
        assert_eq!(channels[2].as_slice(), &[3, 6]);

        let stacked = Image::stack_channels(&channels)?;
        assert_eq!(stacked, image);

        assert_eq!(
            image.channel(3),
            Err(ShapeError::ChannelIndexOutOfBounds(3, 3))
        );
        Ok(())
    }

    #[test]
    fn image_stack_mismatch() -> Result<(), ShapeError> {
        let a = Image::new_gray([2, 2].into(), vec![0u8; 4])?;
        let b = Image::new_gray([1, 2].into(), vec![0u8; 2])?;
        assert!(matches!(
            Image::stack_channels(&[a, b]),
            Err(ShapeError::SizeMismatch { .. })
        ));
        assert_eq!(
            Image::<u8>::stack_channels(&[]),
            Err(ShapeError::ZeroSizedImage)
        );
        Ok(())
    }

    #[test]
    fn image_like_keeps_rank() -> Result<(), ShapeError> {
        let gray = Image::new_gray([3, 2].into(), vec![0u8; 6])?;
        let out = gray.like(0.0f32);
        assert_eq!(out.shape(), gray.shape());

        let padded = gray.resized_like([5, 4].into(), 0u8)?;
        assert_eq!(padded.shape(), vec![4, 5]);
        Ok(())
    }
}
