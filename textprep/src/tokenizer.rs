use encoder::Ragged;
use regex::Regex;

use crate::{patterns, stopwords};

/// Predicate deciding which tokens to drop after splitting.
#[derive(Debug, Clone, Default)]
pub enum DropTokenCond {
    /// Drop empty tokens only.
    #[default]
    Empty,
    /// Drop tokens that are one character repeated ("aaa", "--").
    SingleCharOnly,
    /// Drop single punctuation-character tokens.
    Punctuation,
    /// Drop English stopwords.
    Stopword,
    /// Drop a token if any of the inner conditions would.
    AnyOf(Vec<DropTokenCond>),
}

impl DropTokenCond {
    pub fn drops(&self, token: &str) -> bool {
        match self {
            DropTokenCond::Empty => token.is_empty(),
            DropTokenCond::SingleCharOnly => patterns::single_char_only(token),
            DropTokenCond::Punctuation => {
                token.chars().count() == 1 && token.chars().all(|c| c.is_ascii_punctuation())
            }
            DropTokenCond::Stopword => stopwords::is_stopword(token),
            DropTokenCond::AnyOf(conds) => conds.iter().any(|cond| cond.drops(token)),
        }
    }
}

/// Splits text into word and punctuation tokens.
pub struct WordTokenizer {
    token_regex: Regex,
}

impl WordTokenizer {
    pub fn new() -> Self {
        let token_regex = Regex::new(r"\w+(?:'\w+)*|[^\w\s]").unwrap();

        Self { token_regex }
    }

    /// Tokenize one string, dropping tokens matched by `drop_cond`.
    pub fn tokenize(&self, text: &str, drop_cond: &DropTokenCond) -> Vec<String> {
        self.token_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|token| !drop_cond.drops(token))
            .collect()
    }

    /// Tokenize every string leaf of a nested sequence; each leaf becomes a
    /// branch of its tokens, adding one nesting level.
    pub fn tokenize_ragged(
        &self,
        text_sequences: &Ragged<String>,
        drop_cond: &DropTokenCond,
    ) -> Ragged<String> {
        match text_sequences {
            Ragged::Leaf(text) => Ragged::branch(
                self.tokenize(text, drop_cond)
                    .into_iter()
                    .map(Ragged::leaf)
                    .collect(),
            ),
            Ragged::Branch(children) => Ragged::branch(
                children
                    .iter()
                    .map(|child| self.tokenize_ragged(child, drop_cond))
                    .collect(),
            ),
        }
    }

    /// Sliding-window tokens: for every span length in `spans`, each run of
    /// that many consecutive word tokens joined by `delimiter`. Span lengths
    /// of zero or longer than the token list produce nothing.
    pub fn window_tokenize(
        &self,
        text: &str,
        spans: &[usize],
        drop_cond: &DropTokenCond,
        drop_window_cond: &DropTokenCond,
        delimiter: &str,
    ) -> Vec<String> {
        let tokens = self.tokenize(text, drop_cond);

        let mut windows = Vec::new();
        for &span in spans {
            if span == 0 || span > tokens.len() {
                continue;
            }
            for window in tokens.windows(span) {
                windows.push(window.join(delimiter));
            }
        }

        windows
            .into_iter()
            .filter(|window| !drop_window_cond.drops(window))
            .collect()
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
