use imfilter_image::{Image, Kernel, ShapeError};
use num_traits::AsPrimitive;

use super::FilterOptions;
use crate::padding::{pad_image, Padding2D};
use crate::parallel::for_each_row;

/// Convolve an image with a square kernel, writing the raw response.
///
/// Every output sample `(y, x, c)` is the sum of the `k x k` window of the padded
/// image whose top-left corner is `(y, x)` in padded coordinates, multiplied
/// elementwise with the kernel. Channels are filtered independently with the
/// same kernel. The image is padded by `k / 2` on every side, so even-sized
/// kernels see one more row and column of context above and to the left of the
/// output pixel than below and to the right.
///
/// Samples are multiplied with the `f64` kernel weights, accumulated in `f64` and
/// the sum is stored as `f32`; no clipping is applied. Use [`quantize_u8`] to bring the response back to 8-bit samples.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W) or (H, W, C).
/// * `dst` - The destination image, same shape as `src`.
/// * `kernel` - The square kernel.
/// * `options` - Border handling and execution strategy.
///
/// # Errors
///
/// Returns [`ShapeError::SizeMismatch`] if `dst` and `src` do not share a shape.
pub fn filter2d<T>(
    src: &Image<T>,
    dst: &mut Image<f32>,
    kernel: &Kernel,
    options: &FilterOptions,
) -> Result<(), ShapeError>
where
    T: Copy + Send + Sync + AsPrimitive<f32>,
{
    if src.shape() != dst.shape() {
        return Err(ShapeError::SizeMismatch {
            expected: src.shape(),
            actual: dst.shape(),
        });
    }

    let padding = Padding2D::for_kernel(kernel.size());
    let padded = pad_image(
        &src.map(|&v| v.as_()),
        padding,
        options.padding_mode,
        options.border_value,
    )?;

    log::trace!(
        "filter2d: padded {} to {} with {:?}",
        src.size(),
        padded.size(),
        options.padding_mode
    );

    let num_channels = src.num_channels();
    let padded_stride = padded.row_stride();
    let padded_data = padded.as_slice();
    let kernel_size = kernel.size();

    for_each_row(
        dst.as_slice_mut(),
        src.row_stride(),
        options.strategy,
        |y, dst_row| {
            for (x, dst_pixel) in dst_row.chunks_exact_mut(num_channels).enumerate() {
                for (c, dst_sample) in dst_pixel.iter_mut().enumerate() {
                    let mut sum = 0.0f64;
                    for (ky, kernel_row) in kernel.rows().enumerate() {
                        let row_start = (y + ky) * padded_stride + x * num_channels + c;
                        let window_row = padded_data[row_start..]
                            .iter()
                            .step_by(num_channels)
                            .take(kernel_size);
                        for (&sample, &weight) in window_row.zip(kernel_row) {
                            sum += sample as f64 * weight;
                        }
                    }
                    *dst_sample = sum as f32;
                }
            }
        },
    );

    Ok(())
}

/// Clip a filter response to `[0, 255]` and truncate it to 8-bit samples.
///
/// Values are truncated toward zero after clipping, so `13.9` becomes `13`.
/// NaN responses become `0`. The output keeps the shape of `src`.
///
/// # Example
///
/// ```rust
/// use imfilter_image::Image;
/// use imfilter_imgproc::filter::quantize_u8;
///
/// let response = Image::from_shape_vec(&[1, 4], vec![-3.0f32, 13.9, 254.5, 300.0]).unwrap();
/// let quantized = quantize_u8(&response);
///
/// assert_eq!(quantized.as_slice(), &[0, 13, 254, 255]);
/// ```
pub fn quantize_u8(src: &Image<f32>) -> Image<u8> {
    src.map(|&v| v.clamp(0.0, 255.0) as u8)
}

/// Apply a 2D convolution to an image and quantize the result to 8 bits.
///
/// Equivalent to [`apply_filter_with`] with the default [`FilterOptions`]: zero
/// padding of `k / 2` samples on every side and rows computed in parallel.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W) or (H, W, C). Samples of any primitive
///   numeric type are converted to `f32`.
/// * `kernel` - The square kernel, applied to every channel.
///
/// # Returns
///
/// A freshly allocated `u8` image with the same shape as `image`, where every
/// response was clipped to `[0, 255]` and truncated.
///
/// # Errors
///
/// Shape errors are raised before any pixel is computed.
///
/// # Example
///
/// ```rust
/// use imfilter_image::{Image, Kernel};
/// use imfilter_imgproc::filter::apply_filter;
///
/// let image = Image::from_shape_vec(
///     &[3, 3],
///     vec![10u8, 20, 30, 40, 50, 60, 70, 80, 90],
/// )
/// .unwrap();
/// let kernel = Kernel::from_shape_vec(&[3, 3], vec![1.0 / 9.0; 9]).unwrap();
///
/// let filtered = apply_filter(&image, &kernel).unwrap();
///
/// assert_eq!(filtered.shape(), image.shape());
/// assert_eq!(filtered.get([1, 1, 0]), Some(&50));
/// assert_eq!(filtered.get([0, 0, 0]), Some(&13));
/// ```
pub fn apply_filter<T>(image: &Image<T>, kernel: &Kernel) -> Result<Image<u8>, ShapeError>
where
    T: Copy + Send + Sync + AsPrimitive<f32>,
{
    apply_filter_with(image, kernel, &FilterOptions::default())
}

/// Apply a 2D convolution with explicit options and quantize the result to 8 bits.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W) or (H, W, C).
/// * `kernel` - The square kernel, applied to every channel.
/// * `options` - Border handling and execution strategy.
pub fn apply_filter_with<T>(
    image: &Image<T>,
    kernel: &Kernel,
    options: &FilterOptions,
) -> Result<Image<u8>, ShapeError>
where
    T: Copy + Send + Sync + AsPrimitive<f32>,
{
    log::debug!(
        "apply_filter: image {:?}, kernel {}x{}, padding {}, {:?}",
        image.shape(),
        kernel.size(),
        kernel.size(),
        kernel.padding(),
        options.strategy
    );

    let mut response = image.like(0.0f32);
    filter2d(image, &mut response, kernel, options)?;

    Ok(quantize_u8(&response))
}
