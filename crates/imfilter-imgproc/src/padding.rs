use imfilter_image::{Image, ImageSize, ShapeError};
use rayon::prelude::*;

/// A border type for the spatial padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// This border type fills the border with a single, constant value.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    #[default]
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// This border type reflects the pixel values at the boundary, starting with the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// This border type wraps the content from the opposite side to fill the border.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl PaddingMode {
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i - 1;
            } else {
                i = 2 * len - i - 1;
            }
        }
        i as usize
    }

    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    #[inline]
    fn wrap(i: isize, len: usize) -> usize {
        i.rem_euclid(len as isize) as usize
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the padding mode.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Wrap`: circular wrap
    /// - `Constant`: returns 0 (not used directly)
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            PaddingMode::Replicate => i.clamp(0, len as isize - 1) as usize,
            PaddingMode::Reflect => Self::reflect(i, len),
            PaddingMode::Reflect101 => Self::reflect101(i, len),
            PaddingMode::Wrap => Self::wrap(i, len),
            PaddingMode::Constant => 0,
        }
    }

    /// Fills the border of `new_data`, which already holds the source image in its center.
    ///
    /// [`PaddingMode::Constant`] borders are written when `new_data` is initialized,
    /// so this is a no-op for that mode.
    fn fill_border<T: Copy + Send + Sync>(
        &self,
        new_data: &mut [T],
        old_size: ImageSize,
        new_size: ImageSize,
        num_channels: usize,
        padding: &Padding2D,
    ) {
        if let PaddingMode::Constant = self {
            return;
        }

        let Padding2D {
            top,
            bottom,
            left,
            right,
        } = *padding;
        let row_stride = new_size.width * num_channels;

        // top
        {
            let (top_section, rest) = new_data.split_at_mut(top * row_stride);

            top_section
                .par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, dst_row)| {
                    let src_y = self.map_index(y as isize - top as isize, old_size.height);
                    dst_row.copy_from_slice(&rest[src_y * row_stride..(src_y + 1) * row_stride]);
                });
        }

        // bottom
        {
            let first_bottom = new_size.height - bottom;
            let (rest, bottom_section) = new_data.split_at_mut(first_bottom * row_stride);

            bottom_section
                .par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(idx, dst_row)| {
                    let y = first_bottom + idx;
                    let src_y = self.map_index(y as isize - top as isize, old_size.height);
                    let src_start = (src_y + top) * row_stride;
                    dst_row.copy_from_slice(&rest[src_start..src_start + row_stride]);
                });
        }

        // left and right, on every row including the ones filled above
        new_data.par_chunks_exact_mut(row_stride).for_each(|row| {
            let border_columns = (0..left).chain(new_size.width - right..new_size.width);
            for x in border_columns {
                let src_x = self.map_index(x as isize - left as isize, old_size.width);
                let src_idx = (left + src_x) * num_channels;
                row.copy_within(src_idx..src_idx + num_channels, x * num_channels);
            }
        });
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// The same amount of padding on all four sides.
    pub fn uniform(amount: usize) -> Self {
        Self {
            top: amount,
            bottom: amount,
            left: amount,
            right: amount,
        }
    }

    /// The padding needed to slide a `kernel_size` window over every pixel, `kernel_size / 2`.
    ///
    /// For even kernel sizes the padded image is exactly `kernel_size` larger than
    /// the source, one sample more than the window reaches past the bottom/right edge.
    pub fn for_kernel(kernel_size: usize) -> Self {
        Self::uniform(kernel_size / 2)
    }

    /// The size of an image of `size` once this padding is applied.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Example
    /// ```rust
    /// use imfilter_image::ImageSize;
    /// use imfilter_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == new_size
    }
}

/// Pads `src` into `dst`, centering the source image and filling the border
/// according to `padding_mode`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides.
/// * `padding_mode` - The type of border handling to use.
/// * `constant_value` - The sample value used by [`PaddingMode::Constant`], for every channel.
///
/// # Errors
///
/// Returns [`ShapeError::PaddedSizeMismatch`] if the size of `dst` is not the size
/// of `src` plus `padding`, and [`ShapeError::SizeMismatch`] if the channel
/// layouts differ.
///
/// # Example
///
/// ```rust
/// use imfilter_image::{Image, ImageSize};
/// use imfilter_imgproc::padding::{spatial_padding, Padding2D, PaddingMode};
///
/// let src = Image::from_size_val([2, 2].into(), 3, 1u8).unwrap();
/// let mut dst = Image::from_size_val([4, 4].into(), 3, 0u8).unwrap();
///
/// spatial_padding(&src, &mut dst, Padding2D::uniform(1), PaddingMode::Constant, 0u8).unwrap();
///
/// assert_eq!(dst.get([0, 0, 0]), Some(&0));
/// assert_eq!(dst.get([1, 1, 0]), Some(&1));
/// ```
pub fn spatial_padding<T>(
    src: &Image<T>,
    dst: &mut Image<T>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: T,
) -> Result<(), ShapeError>
where
    T: Copy + Send + Sync,
{
    if !padding.validate_size(src.size(), dst.size()) {
        let expected = padding.padded_size(src.size());
        return Err(ShapeError::PaddedSizeMismatch(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    if src.num_channels() != dst.num_channels() || src.rank() != dst.rank() {
        let mut expected = vec![dst.height(), dst.width()];
        if src.rank() == 3 {
            expected.push(src.num_channels());
        }
        return Err(ShapeError::SizeMismatch {
            expected,
            actual: dst.shape(),
        });
    }

    let num_channels = src.num_channels();
    let old_size = src.size();
    let new_size = dst.size();
    let old_stride = src.row_stride();
    let new_stride = dst.row_stride();

    let new_data = dst.as_slice_mut();
    new_data.fill(constant_value);

    // copy the source rows into the center of the padded buffer
    let row_offset = padding.top * new_stride + padding.left * num_channels;
    for (src_row, dst_row) in src
        .as_slice()
        .chunks_exact(old_stride)
        .zip(new_data[row_offset..].chunks_mut(new_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    padding_mode.fill_border(new_data, old_size, new_size, num_channels, &padding);

    Ok(())
}

/// Allocates and returns a padded copy of `src`.
///
/// The result keeps the rank and channel count of `src`.
pub fn pad_image<T>(
    src: &Image<T>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: T,
) -> Result<Image<T>, ShapeError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.resized_like(padding.padded_size(src.size()), constant_value)?;
    spatial_padding(src, &mut dst, padding, padding_mode, constant_value)?;
    Ok(dst)
}
