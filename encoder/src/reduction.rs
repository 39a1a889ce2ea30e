use ndarray::{Array1, ArrayD, Axis};

use crate::{EncoderError, Result};

/// Collapses a per-token encoded tensor and its weight tensor down to one
/// value per top-level example (axis 0).
pub trait EncoderReduction {
    fn reduce(&self, encoded: &ArrayD<f64>, weights: &ArrayD<f64>) -> Result<Array1<f64>>;
}

/// Multiply by the weight tensor elementwise, then flatten each example and
/// collect the weighted values per example. Weight-0 positions contribute
/// exactly 0 to any aggregate, so the padding fill value never leaks into a
/// result.
///
/// The weight tensor either matches the encoded shape exactly or is one
/// axis short, in which case it broadcasts over a trailing feature axis.
fn weighted_examples(encoded: &ArrayD<f64>, weights: &ArrayD<f64>) -> Result<Vec<Vec<f64>>> {
    if encoded.ndim() == 0 {
        return Err(EncoderError::ScalarBatch);
    }

    let weighted: ArrayD<f64> = if weights.ndim() == encoded.ndim() {
        if weights.shape() != encoded.shape() {
            return Err(EncoderError::ShapeMismatch {
                text: encoded.shape().to_vec(),
                weights: weights.shape().to_vec(),
            });
        }
        encoded * weights
    } else if weights.ndim() + 1 == encoded.ndim()
        && weights.shape() == &encoded.shape()[..weights.ndim()]
    {
        let expanded = weights.clone().insert_axis(Axis(weights.ndim()));
        encoded * &expanded
    } else {
        return Err(EncoderError::ShapeMismatch {
            text: encoded.shape().to_vec(),
            weights: weights.shape().to_vec(),
        });
    };

    Ok(weighted
        .outer_iter()
        .map(|example| example.iter().copied().collect())
        .collect())
}

/// Weighted aggregation with a caller-supplied function applied over every
/// axis but the first.
pub struct WeightedReduction {
    aggregate: Box<dyn Fn(&[f64]) -> f64>,
}

impl WeightedReduction {
    pub fn new(aggregate: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        Self {
            aggregate: Box::new(aggregate),
        }
    }

    pub fn sum() -> Self {
        Self::new(|values| values.iter().sum())
    }

    /// Mean over every position of the example, padded positions included
    /// (they hold exact zeros after weighting).
    pub fn mean() -> Self {
        Self::new(|values| values.iter().sum::<f64>() / values.len() as f64)
    }

    pub fn max() -> Self {
        Self::new(|values| values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }
}

impl EncoderReduction for WeightedReduction {
    fn reduce(&self, encoded: &ArrayD<f64>, weights: &ArrayD<f64>) -> Result<Array1<f64>> {
        let examples = weighted_examples(encoded, weights)?;
        Ok(examples
            .iter()
            .map(|example| (self.aggregate)(example))
            .collect())
    }
}

/// Self-normalizing aggregate over the weighted values `x` of each example:
/// `sum(sign(x) * x^2) / (sum(|x|) + epsilon)`.
///
/// Up-weights larger-magnitude per-token scores, a soft arg-max over signed
/// scores rather than a plain average. The epsilon keeps an all-zero example
/// from dividing by zero.
pub struct SelfWeightedAverage {
    pub epsilon: f64,
}

impl Default for SelfWeightedAverage {
    fn default() -> Self {
        Self { epsilon: 1e-5 }
    }
}

impl EncoderReduction for SelfWeightedAverage {
    fn reduce(&self, encoded: &ArrayD<f64>, weights: &ArrayD<f64>) -> Result<Array1<f64>> {
        let examples = weighted_examples(encoded, weights)?;
        Ok(examples
            .iter()
            .map(|example| {
                let numerator: f64 = example.iter().map(|&x| x.signum() * x * x).sum();
                let denominator: f64 = example.iter().map(|&x| x.abs()).sum::<f64>() + self.epsilon;
                numerator / denominator
            })
            .collect())
    }
}
