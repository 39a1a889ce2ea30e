pub mod normalize;

pub use normalize::{normalize_scores, rolling_normalize};
