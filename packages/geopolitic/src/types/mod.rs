//! Data model threaded through the pipeline.

pub mod lens;
pub mod seed;
pub mod source;
pub mod state;

pub use lens::{Lens, SearchScope};
pub use seed::SeedSources;
pub use source::{verdicts, Claim, FactCheckResult, Source};
pub use state::{PipelineState, StateUpdate};
