// Adapters layer: concrete scorers for the remote churn model.

pub mod http;

#[cfg(feature = "lambda")]
pub mod sagemaker;

pub use http::HttpScorer;

#[cfg(feature = "lambda")]
pub use sagemaker::SageMakerScorer;
