use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextPrepError {
    #[error("Unsupported n-gram order {0}: collocation extraction supports orders 2 through 4")]
    UnsupportedNgramOrder(usize),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for text preparation operations
pub type Result<T> = std::result::Result<T, TextPrepError>;
