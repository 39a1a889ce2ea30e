/// Linear min-max rescale of `scores` into `[min_score, max_score]`.
///
/// A constant input (max == min) propagates NaN for every entry rather than
/// silently substituting a default; callers needing a fallback must check
/// for non-finite outputs themselves.
fn linear_rescale(scores: &[f64], min_score: f64, max_score: f64) -> Vec<f64> {
    let min_target = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max_target = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    scores
        .iter()
        .map(|&score| {
            min_score + (max_score - min_score) * (score - min_target) / (max_target - min_target)
        })
        .collect()
}

/// Partition `scores` by sign and apply `rescale` to each partition with
/// independent statistics: entries above zero map into `[0, max_score]`;
/// when any entry is strictly negative, the non-positive entries map
/// together into `[min_score, 0]`, which pins every zero entry to exactly
/// zero as its partition's maximum. With no negative entries, zeros are
/// left untouched.
fn polarity_partitioned(
    scores: &[f64],
    min_score: f64,
    max_score: f64,
    rescale: impl Fn(&[f64], f64, f64) -> Vec<f64>,
) -> Vec<f64> {
    let mut result = scores.to_vec();

    let positive: Vec<usize> = (0..scores.len()).filter(|&i| scores[i] > 0.0).collect();
    if !positive.is_empty() {
        let values: Vec<f64> = positive.iter().map(|&i| scores[i]).collect();
        let rescaled = rescale(&values, 0.0, max_score);
        for (&i, &value) in positive.iter().zip(&rescaled) {
            result[i] = value;
        }
    }

    if scores.iter().any(|&score| score < 0.0) {
        let non_positive: Vec<usize> = (0..scores.len()).filter(|&i| scores[i] <= 0.0).collect();
        let values: Vec<f64> = non_positive.iter().map(|&i| scores[i]).collect();
        let rescaled = rescale(&values, min_score, 0.0);
        for (&i, &value) in non_positive.iter().zip(&rescaled) {
            result[i] = value;
        }
    }

    result
}

/// Rescale `scores` into `[min_score, max_score]`.
///
/// With `preserve_polarity`, positive and negative entries are rescaled as
/// two independent partitions (into `[0, max_score]` and `[min_score, 0]`
/// respectively) so that sign semantics survive the rescale, and zero
/// entries stay at zero.
pub fn normalize_scores(
    scores: &[f64],
    min_score: f64,
    max_score: f64,
    preserve_polarity: bool,
) -> Vec<f64> {
    if !preserve_polarity {
        return linear_rescale(scores, min_score, max_score);
    }
    polarity_partitioned(scores, min_score, max_score, linear_rescale)
}

/// Online, causal normalization: each index is rescaled using only the
/// statistics of its own trailing window.
///
/// The first `window` entries are normalized as one batch; every later
/// index re-normalizes its trailing window and keeps only the last value.
/// `window` defaults to one third of the input length (minimum 1) and is
/// clamped to the input length. Stateless across calls: the output is a
/// pure function of the input sequence and window size.
pub fn rolling_normalize(
    scores: &[f64],
    min_score: f64,
    max_score: f64,
    window: Option<usize>,
    preserve_polarity: bool,
) -> Vec<f64> {
    if preserve_polarity {
        return polarity_partitioned(scores, min_score, max_score, |values, lo, hi| {
            rolling_rescale(values, lo, hi, window)
        });
    }
    rolling_rescale(scores, min_score, max_score, window)
}

fn rolling_rescale(scores: &[f64], min_score: f64, max_score: f64, window: Option<usize>) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let window = window
        .unwrap_or(scores.len() / 3)
        .max(1)
        .min(scores.len());
    tracing::debug!(window, total = scores.len(), "rolling normalization");

    let mut normalized = linear_rescale(&scores[..window], min_score, max_score);
    for t in 1..=scores.len() - window {
        let rescaled = linear_rescale(&scores[t..t + window], min_score, max_score);
        normalized.push(rescaled[window - 1]);
    }

    normalized
}
