use crate::{padding::PaddingMode, parallel::ExecutionStrategy};

/// Options for the 2D convolution.
///
/// The default zero-fills the border and computes output rows in parallel.
///
/// # Example
///
/// ```rust
/// use imfilter_imgproc::filter::FilterOptions;
/// use imfilter_imgproc::padding::PaddingMode;
/// use imfilter_imgproc::parallel::ExecutionStrategy;
///
/// let options = FilterOptions::new()
///     .with_padding_mode(PaddingMode::Replicate)
///     .with_strategy(ExecutionStrategy::Serial);
///
/// assert_eq!(options.padding_mode, PaddingMode::Replicate);
/// assert_eq!(options.border_value, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterOptions {
    /// How samples outside the image are synthesized.
    pub padding_mode: PaddingMode,
    /// The border sample used by [`PaddingMode::Constant`].
    pub border_value: f32,
    /// How output rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            padding_mode: PaddingMode::Constant,
            border_value: 0.0,
            strategy: ExecutionStrategy::ParallelRows,
        }
    }
}

impl FilterOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border handling.
    pub fn with_padding_mode(mut self, padding_mode: PaddingMode) -> Self {
        self.padding_mode = padding_mode;
        self
    }

    /// Set the value written into the border by [`PaddingMode::Constant`].
    pub fn with_border_value(mut self, border_value: f32) -> Self {
        self.border_value = border_value;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
