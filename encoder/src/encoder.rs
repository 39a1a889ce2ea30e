use ndarray::{Array1, ArrayD, IxDyn};

use crate::reduction::{EncoderReduction, WeightedReduction};
use crate::{EncoderError, Ragged, Result};

/// The single external-call boundary: maps a flat, row-major batch of
/// strings to numeric outputs.
///
/// The output length must be an exact multiple `k` of the input length:
/// `k == 1` for one score per string, `k > 1` for fixed-width vectors.
/// Anything else is an [`EncoderError::EncodeContract`] violation.
pub trait FlatEncode {
    fn flat_encode(&self, flat_text: &[String]) -> Result<Vec<f64>>;
}

impl<F> FlatEncode for F
where
    F: Fn(&[String]) -> Result<Vec<f64>>,
{
    fn flat_encode(&self, flat_text: &[String]) -> Result<Vec<f64>> {
        self(flat_text)
    }
}

/// Pad the text inputs and produce the parallel weight tensor.
///
/// Without explicit weights the mask is recorded during padding: 1.0 at
/// every real position, 0.0 at padding. Explicit weights must share the
/// text's nesting structure; they are padded with 0.0 and must come out
/// the exact same shape as the text tensor.
pub fn pad_inputs(
    text_inputs: &Ragged<String>,
    text_weights: Option<&Ragged<f64>>,
) -> Result<(ArrayD<String>, ArrayD<f64>)> {
    let (text_tensor, mask) = text_inputs.padded_with_mask(&String::new())?;

    let weight_tensor = match text_weights {
        None => mask,
        Some(weights) => {
            let weight_tensor = weights.padded(&0.0)?;
            if weight_tensor.shape() != text_tensor.shape() {
                return Err(EncoderError::ShapeMismatch {
                    text: text_tensor.shape().to_vec(),
                    weights: weight_tensor.shape().to_vec(),
                });
            }
            weight_tensor
        }
    };

    tracing::debug!(
        shape = ?text_tensor.shape(),
        "padded ragged text inputs to dense tensor"
    );

    Ok((text_tensor, weight_tensor))
}

/// Pads nested text inputs to a dense tensor, runs them through an external
/// flat encoder exactly once, and reduces the per-token outputs to one score
/// per top-level example.
pub struct TextEncoder<E> {
    encoder: E,
    reduction: Box<dyn EncoderReduction>,
}

impl<E: FlatEncode> TextEncoder<E> {
    /// Encoder with the default weighted-sum reduction.
    pub fn new(encoder: E) -> Self {
        Self::with_reduction(encoder, Box::new(WeightedReduction::sum()))
    }

    pub fn with_reduction(encoder: E, reduction: Box<dyn EncoderReduction>) -> Self {
        Self { encoder, reduction }
    }

    /// Flatten to 1-D row-major, call the external encoder once, and reshape
    /// the outputs back to the text tensor's shape. When the encoder returns
    /// `k > 1` values per input, a trailing feature axis of length `k` is
    /// appended.
    pub fn flat_map_encode(&self, text_tensor: &ArrayD<String>) -> Result<ArrayD<f64>> {
        let flat: Vec<String> = text_tensor.iter().cloned().collect();
        let encoded = self.encoder.flat_encode(&flat)?;

        let mut shape = text_tensor.shape().to_vec();
        if flat.is_empty() {
            if !encoded.is_empty() {
                return Err(EncoderError::EncodeContract {
                    expected: 0,
                    returned: encoded.len(),
                });
            }
            return Ok(ArrayD::from_shape_vec(IxDyn(&shape), encoded)?);
        }

        if encoded.len() % flat.len() != 0 {
            return Err(EncoderError::EncodeContract {
                expected: flat.len(),
                returned: encoded.len(),
            });
        }

        let width = encoded.len() / flat.len();
        if width > 1 {
            shape.push(width);
        }

        Ok(ArrayD::from_shape_vec(IxDyn(&shape), encoded)?)
    }

    /// The full pipeline: pad, encode through the external boundary exactly
    /// once, and reduce to one score per top-level example.
    pub fn encode(
        &self,
        text_inputs: &Ragged<String>,
        text_weights: Option<&Ragged<f64>>,
    ) -> Result<Array1<f64>> {
        if text_inputs.is_leaf() {
            return Err(EncoderError::ScalarBatch);
        }

        let (text_tensor, weight_tensor) = pad_inputs(text_inputs, text_weights)?;
        let output_tensor = self.flat_map_encode(&text_tensor)?;
        self.reduction.reduce(&output_tensor, &weight_tensor)
    }
}
