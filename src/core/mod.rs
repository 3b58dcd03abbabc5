pub mod batcher;
pub mod classifier;
pub mod decoder;
pub mod inference;
pub mod parser;
pub mod pipeline;
pub mod recommendation;
pub mod report;

pub use crate::domain::model::{FeatureRow, FeatureVector, Report, RiskReportEntry, ScoredRow};
pub use crate::domain::ports::{ChurnScorer, ConfigProvider};
pub use crate::utils::error::Result;
