use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("Incompatible input weights: weight tensor padded to shape {weights:?} does not match text tensor shape {text:?}")]
    ShapeMismatch { text: Vec<usize>, weights: Vec<usize> },

    #[error("Target shape {target:?} cannot contain input with bounding shape {required:?}")]
    TargetShape {
        target: Vec<usize>,
        required: Vec<usize>,
    },

    #[error("Irregular nesting depth: leaf found at depth {depth} where siblings nest {expected} more level(s)")]
    IrregularDepth { depth: usize, expected: usize },

    #[error("Flat encoder contract violation: {returned} outputs for {expected} inputs")]
    EncodeContract { expected: usize, returned: usize },

    #[error("Expected a batch (top-level sequence), got a bare scalar")]
    ScalarBatch,

    #[error("Tensor construction error: {0}")]
    Tensor(#[from] ndarray::ShapeError),
}

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, EncoderError>;
