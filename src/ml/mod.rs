// Classifier artifact loading and inference

pub mod artifact;

pub use artifact::*;
