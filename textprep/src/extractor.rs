use std::collections::HashMap;

use encoder::Ragged;

use crate::{Result, TextPrepError};

const MIN_NGRAM_ORDER: usize = 2;
const MAX_NGRAM_ORDER: usize = 4;

/// Extract the `extract_m` highest-scoring collocations of order `n` from a
/// nested token sequence, ranked by pointwise mutual information.
///
/// Supports bigrams through quadgrams. Token sequences are flattened in
/// row-major order into one stream before counting; n-grams seen fewer than
/// `min_freq` times are discarded. Ties break lexicographically so the
/// ranking is deterministic.
pub fn extract_ngrams_by_pmi(
    token_sequences: &Ragged<String>,
    n: usize,
    extract_m: usize,
    min_freq: usize,
) -> Result<Vec<Vec<String>>> {
    if !(MIN_NGRAM_ORDER..=MAX_NGRAM_ORDER).contains(&n) {
        return Err(TextPrepError::UnsupportedNgramOrder(n));
    }

    let tokens: Vec<&String> = token_sequences.flatten();
    if tokens.len() < n {
        return Ok(Vec::new());
    }

    let mut unigram_counts: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *unigram_counts.entry(token.as_str()).or_default() += 1;
    }

    let mut ngram_counts: HashMap<Vec<&str>, usize> = HashMap::new();
    for window in tokens.windows(n) {
        let ngram: Vec<&str> = window.iter().map(|token| token.as_str()).collect();
        *ngram_counts.entry(ngram).or_default() += 1;
    }

    let total = tokens.len() as f64;
    let mut scored: Vec<(Vec<&str>, f64)> = ngram_counts
        .into_iter()
        .filter(|(_, count)| *count >= min_freq)
        .map(|(ngram, count)| {
            // PMI for an order-n gram: log2(c(g) * N^(n-1) / prod c(w_i)).
            let joint = count as f64 * total.powi(n as i32 - 1);
            let independent: f64 = ngram
                .iter()
                .map(|word| unigram_counts[word] as f64)
                .product();
            let pmi = (joint / independent).log2();
            (ngram, pmi)
        })
        .collect();

    scored.sort_by(|(a_gram, a_pmi), (b_gram, b_pmi)| {
        b_pmi
            .partial_cmp(a_pmi)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a_gram.cmp(b_gram))
    });

    tracing::debug!(
        order = n,
        candidates = scored.len(),
        "ranked collocation candidates"
    );

    Ok(scored
        .into_iter()
        .take(extract_m)
        .map(|(ngram, _)| ngram.into_iter().map(str::to_string).collect())
        .collect())
}
