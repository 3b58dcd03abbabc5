pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalFiles, CliConfig};

pub use adapters::HttpScorer;
#[cfg(feature = "lambda")]
pub use adapters::SageMakerScorer;
pub use app::{handle_request, HttpRequest, HttpResponse};
pub use config::{lambda::LambdaConfig, toml_config::TomlConfig};
pub use core::pipeline::{ChurnPipeline, PipelineOptions};
pub use utils::error::{ChurnError, Result};
