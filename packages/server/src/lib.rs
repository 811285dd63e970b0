// GeopoliticAI - API Core
//
// This crate wires the research pipeline to its environment: configuration
// from env vars, collaborator construction, the HTTP service and logging.
// The pipeline itself lives in the `geopolitic` package.

pub mod config;
pub mod kernel;
pub mod server;
pub mod telemetry;

pub use config::*;
