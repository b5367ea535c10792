use num_traits::AsPrimitive;

use crate::error::ShapeError;

/// A square matrix of convolution weights.
///
/// The weights are stored row-major. Kernels of any size `k >= 1` are accepted;
/// odd sizes center the kernel on the output pixel, even sizes are anchored
/// one sample above and to the left of center (see [`Kernel::padding`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from a shape and its row-major weights.
    ///
    /// # Arguments
    ///
    /// * `shape` - Must be `[k, k]` with `k >= 1`.
    /// * `data` - The `k * k` weights.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidKernelShape`] if the shape is not square and
    /// of rank 2, and [`ShapeError::InvalidDataLength`] if the number of weights
    /// does not match.
    ///
    /// # Examples
    ///
    /// ```
    /// use imfilter_image::Kernel;
    ///
    /// let kernel = Kernel::from_shape_vec(&[3, 3], vec![1.0 / 9.0; 9]).unwrap();
    /// assert_eq!(kernel.size(), 3);
    /// assert_eq!(kernel.padding(), 1);
    ///
    /// assert!(Kernel::from_shape_vec(&[3, 2], vec![0.0; 6]).is_err());
    /// ```
    pub fn from_shape_vec(shape: &[usize], data: Vec<f64>) -> Result<Self, ShapeError> {
        match *shape {
            [rows, cols] if rows == cols && rows > 0 => Self::new(rows, data),
            _ => Err(ShapeError::InvalidKernelShape(shape.to_vec())),
        }
    }

    /// Create a kernel from weights of any primitive numeric type.
    ///
    /// The weights are converted to `f64` with an `as` cast.
    pub fn from_shape_weights<W>(shape: &[usize], weights: &[W]) -> Result<Self, ShapeError>
    where
        W: AsPrimitive<f64>,
    {
        Self::from_shape_vec(shape, weights.iter().map(|w| w.as_()).collect())
    }

    /// Create a `size x size` kernel from its row-major weights.
    pub fn new(size: usize, data: Vec<f64>) -> Result<Self, ShapeError> {
        if size == 0 {
            return Err(ShapeError::InvalidKernelShape(vec![0, 0]));
        }

        let expected = size
            .checked_mul(size)
            .ok_or_else(|| ShapeError::ShapeOverflow(vec![size, size]))?;

        if data.len() != expected {
            return Err(ShapeError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { size, data })
    }

    /// Create a kernel from a fixed-size array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use imfilter_image::Kernel;
    ///
    /// let kernel = Kernel::from_rows(&[
    ///     [0.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 0.0],
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(kernel.get(1, 1), Some(1.0));
    /// ```
    pub fn from_rows<const K: usize>(rows: &[[f64; K]; K]) -> Result<Self, ShapeError> {
        Self::new(K, rows.iter().flatten().copied().collect())
    }

    /// The side length `k` of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The kernel shape, `[k, k]`.
    pub fn shape(&self) -> [usize; 2] {
        [self.size, self.size]
    }

    /// Number of padding samples needed on every side of the image, `k / 2`.
    ///
    /// NOTE: for even `k` the kernel covers `k / 2` samples before the anchor
    /// and `k / 2 - 1` after it, so the effective window is not symmetric.
    pub fn padding(&self) -> usize {
        self.size / 2
    }

    /// The row-major weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the weight at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.data.get(row * self.size + col).copied()
    }

    /// Iterate the kernel rows.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_from_shape_vec() -> Result<(), ShapeError> {
        let kernel = Kernel::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
        assert_eq!(kernel.size(), 2);
        assert_eq!(kernel.shape(), [2, 2]);
        assert_eq!(kernel.padding(), 1);
        assert_eq!(kernel.get(1, 0), Some(3.0));
        assert_eq!(kernel.get(2, 0), None);

        let rows = kernel.rows().collect::<Vec<_>>();
        assert_eq!(rows, vec![&[1.0f64, 2.0][..], &[3.0f64, 4.0][..]]);
        Ok(())
    }

    #[test]
    fn kernel_invalid_shape() {
        assert_eq!(
            Kernel::from_shape_vec(&[3, 2], vec![0.0; 6]),
            Err(ShapeError::InvalidKernelShape(vec![3, 2]))
        );
        assert_eq!(
            Kernel::from_shape_vec(&[9], vec![0.0; 9]),
            Err(ShapeError::InvalidKernelShape(vec![9]))
        );
        assert_eq!(
            Kernel::from_shape_vec(&[3, 3, 1], vec![0.0; 9]),
            Err(ShapeError::InvalidKernelShape(vec![3, 3, 1]))
        );
        assert_eq!(
            Kernel::from_shape_vec(&[0, 0], vec![]),
            Err(ShapeError::InvalidKernelShape(vec![0, 0]))
        );
    }

    #[test]
    fn kernel_invalid_data_length() {
        assert_eq!(
            Kernel::new(3, vec![0.0; 8]),
            Err(ShapeError::InvalidDataLength {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn kernel_from_f64_weights() -> Result<(), ShapeError> {
        let kernel = Kernel::from_shape_weights(&[1, 1], &[0.5f64])?;
        assert_eq!(kernel.as_slice(), &[0.5f64]);

        let kernel = Kernel::from_shape_weights(&[1, 1], &[-2i32])?;
        assert_eq!(kernel.as_slice(), &[-2.0f64]);

        let kernel = Kernel::from_shape_weights(&[1, 1], &[1.0f64 / 41.0])?;
        assert_eq!(kernel.as_slice(), &[1.0f64 / 41.0]);
        Ok(())
    }

    #[test]
    fn kernel_size_overflow() {
        assert_eq!(
            Kernel::new(usize::MAX, vec![]),
            Err(ShapeError::ShapeOverflow(vec![usize::MAX, usize::MAX]))
        );
        assert_eq!(
            Kernel::from_shape_vec(&[usize::MAX / 2, usize::MAX / 2], vec![1.0]),
            Err(ShapeError::ShapeOverflow(vec![usize::MAX / 2, usize::MAX / 2]))
        );
    }
}
