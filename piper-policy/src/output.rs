//! Policy output shaping.
use ndarray::{s, Array2};

/// Width of the canonical action vector.
pub const ACTION_DIM: usize = 7;

/// Extracts canonical actions from raw policy output.
///
/// Stateless, one instance serves any number of callers.
#[derive(Clone, Copy, Debug, Default)]
pub struct PiperOutputConverter;

impl PiperOutputConverter {
    /// Keeps the first [`ACTION_DIM`] columns of each output row; models may
    /// emit wider action tensors, the extra columns are dropped.
    ///
    /// Panics when the tensor is narrower than [`ACTION_DIM`] columns.
    pub fn convert(&self, actions: Array2<f32>) -> Array2<f32> {
        actions.slice_move(s![.., ..ACTION_DIM])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    #[test]
    fn extra_columns_are_dropped() {
        let actions = Array::from_shape_fn((4, 10), |(row, col)| (10 * row + col) as f32);

        let out = PiperOutputConverter.convert(actions);
        assert_eq!(out.shape(), &[4, ACTION_DIM]);
        for row in 0..4 {
            for col in 0..ACTION_DIM {
                assert_eq!(out[[row, col]], (10 * row + col) as f32);
            }
        }
    }

    #[test]
    fn exact_width_passes_through() {
        let actions = Array2::<f32>::ones((2, ACTION_DIM));
        assert_eq!(PiperOutputConverter.convert(actions).shape(), &[2, 7]);
    }

    #[test]
    #[should_panic]
    fn narrower_output_fails_at_the_slice() {
        PiperOutputConverter.convert(Array2::<f32>::zeros((2, 3)));
    }
}
