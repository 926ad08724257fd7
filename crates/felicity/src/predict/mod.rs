//! Regression-based score prediction over a frozen, externally
//! trained model.

mod adapter;
mod scorer;
mod source;

pub use adapter::{Prediction, Predictor};
pub use scorer::{LinearModel, Scorer};
pub use source::{ArtifactSource, FileSource, HttpSource};
