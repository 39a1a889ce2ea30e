pub mod encoder;
pub mod error;
pub mod ragged;
pub mod reduction;

pub use encoder::{pad_inputs, FlatEncode, TextEncoder};
pub use error::{EncoderError, Result};
pub use ragged::Ragged;
pub use reduction::{EncoderReduction, SelfWeightedAverage, WeightedReduction};
