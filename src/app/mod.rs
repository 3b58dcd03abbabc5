// Application layer: request envelopes around the scoring pipeline.

pub mod handler;

pub use handler::{handle_request, HttpRequest, HttpResponse};
