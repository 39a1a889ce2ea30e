use encoder::{
    pad_inputs, EncoderReduction, Ragged, Result, SelfWeightedAverage, TextEncoder,
    WeightedReduction,
};

fn l(s: &str) -> Ragged<String> {
    Ragged::leaf(s.to_string())
}

fn b(children: Vec<Ragged<String>>) -> Ragged<String> {
    Ragged::branch(children)
}

/// A toy lexicon standing in for an external sentiment model: one signed
/// score per token, batched over the whole flattened input.
fn lexicon_encode(flat: &[String]) -> Result<Vec<f64>> {
    Ok(flat
        .iter()
        .map(|token| match token.as_str() {
            "surge" | "growth" | "record" => 1.0,
            "crash" | "decline" | "losses" => -1.0,
            _ => 0.0,
        })
        .collect())
}

#[test]
fn test_full_pipeline_sum_reduction() {
    let encoder = TextEncoder::new(lexicon_encode);

    // Two headlines of different token counts.
    let headlines = b(vec![
        b(vec![l("record"), l("growth"), l("this"), l("quarter")]),
        b(vec![l("losses"), l("widen")]),
    ]);

    let scores = encoder.encode(&headlines, None).unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0], 2.0);
    assert_eq!(scores[1], -1.0);
}

#[test]
fn test_full_pipeline_with_explicit_weights() {
    let encoder = TextEncoder::new(lexicon_encode);

    let headlines = b(vec![b(vec![l("surge"), l("crash")]), b(vec![l("growth")])]);
    let weights = Ragged::branch(vec![
        Ragged::branch(vec![Ragged::leaf(2.0), Ragged::leaf(0.5)]),
        Ragged::branch(vec![Ragged::leaf(1.0)]),
    ]);

    let scores = encoder.encode(&headlines, Some(&weights)).unwrap();
    assert_eq!(scores[0], 1.5); // 2.0 * 1 + 0.5 * -1
    assert_eq!(scores[1], 1.0);
}

#[test]
fn test_full_pipeline_self_weighted_average() {
    let encoder = TextEncoder::with_reduction(
        lexicon_encode as fn(&[String]) -> Result<Vec<f64>>,
        Box::new(SelfWeightedAverage::default()),
    );

    // Mixed signals: one strong positive, one neutral filler.
    let headlines = b(vec![b(vec![l("surge"), l("today"), l("today")])]);
    let scores = encoder.encode(&headlines, None).unwrap();

    // (1 + 0 + 0) / (1 + eps): close to the confident token's score.
    assert!((scores[0] - 1.0).abs() < 1e-4);
}

#[test]
fn test_reduction_is_invariant_to_fill_value() {
    // The reduced score must not depend on what value occupied a padded
    // position: weights zero it out before aggregation.
    let headlines = b(vec![
        b(vec![l("surge"), l("growth")]),
        b(vec![l("crash")]),
    ]);
    let (_, weight_tensor) = pad_inputs(&headlines, None).unwrap();

    let encoder = TextEncoder::new(lexicon_encode);
    for fill in ["", "crash", "surge"] {
        let tensor = headlines.padded(&fill.to_string()).unwrap();
        let encoded = encoder.flat_map_encode(&tensor).unwrap();
        let scores = WeightedReduction::sum()
            .reduce(&encoded, &weight_tensor)
            .unwrap();
        assert_eq!(scores.to_vec(), vec![2.0, -1.0], "fill {fill:?} leaked");
    }
}

#[test]
fn test_pipeline_from_json_input() {
    let headlines: Ragged<String> =
        serde_json::from_str(r#"[["surge", "surge"], ["decline"], []]"#).unwrap();

    let encoder = TextEncoder::new(lexicon_encode);
    let scores = encoder.encode(&headlines, None).unwrap();

    assert_eq!(scores.to_vec(), vec![2.0, -1.0, 0.0]);
}

#[test]
fn test_three_level_nesting() {
    // Documents -> sentences -> tokens, reduced to one score per document.
    let documents = b(vec![
        b(vec![
            b(vec![l("surge"), l("in"), l("profits")]),
            b(vec![l("record"), l("quarter")]),
        ]),
        b(vec![b(vec![l("crash")])]),
    ]);

    let encoder = TextEncoder::new(lexicon_encode);
    let scores = encoder.encode(&documents, None).unwrap();

    assert_eq!(scores.to_vec(), vec![2.0, -1.0]);
}
