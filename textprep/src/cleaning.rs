use encoder::Ragged;
use regex::Regex;

/// Lowercase every string leaf, preserving the nesting structure.
pub fn to_lowercase(text_sequences: &Ragged<String>) -> Ragged<String> {
    text_sequences.map(&|text: &String| text.to_lowercase())
}

/// Delete every match of a pre-compiled pattern from each leaf.
pub fn remove_regex(text_sequences: &Ragged<String>, pattern: &Regex) -> Ragged<String> {
    text_sequences.map(&|text: &String| pattern.replace_all(text, "").into_owned())
}

/// Collapse runs of whitespace to single spaces and trim each leaf.
pub fn remove_double_spaces(text_sequences: &Ragged<String>) -> Ragged<String> {
    text_sequences.map(&|text: &String| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Recursively drop empty leaves and branches left empty after pruning.
///
/// A leaf at the top level is returned unchanged; inside a branch, leaves
/// holding the empty string and branches with no surviving children are
/// removed.
pub fn drop_empty_sequences(text_sequences: &Ragged<String>) -> Ragged<String> {
    match text_sequences {
        Ragged::Leaf(text) => Ragged::leaf(text.clone()),
        Ragged::Branch(children) => Ragged::branch(
            children
                .iter()
                .map(drop_empty_sequences)
                .filter(|child| match child {
                    Ragged::Leaf(text) => !text.is_empty(),
                    Ragged::Branch(grandchildren) => !grandchildren.is_empty(),
                })
                .collect(),
        ),
    }
}
