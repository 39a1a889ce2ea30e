pub mod cleaning;
pub mod error;
pub mod extractor;
pub mod patterns;
pub mod stopwords;
pub mod tokenizer;

pub use cleaning::{drop_empty_sequences, remove_double_spaces, remove_regex, to_lowercase};
pub use error::{Result, TextPrepError};
pub use extractor::extract_ngrams_by_pmi;
pub use tokenizer::{DropTokenCond, WordTokenizer};
