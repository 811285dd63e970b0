//! Pipeline stages and the orchestrator that chains them.
//!
//! Every stage reads a [`PipelineState`](crate::types::PipelineState) snapshot
//! and returns the value for the one field it owns. Only the orchestrator
//! merges those values back into the state.

pub mod claims;
pub mod fact_check;
pub mod orchestrator;
pub mod prompts;
pub(crate) mod schema;
pub mod search;
pub mod synthesis;

pub use claims::build_claims;
pub use fact_check::fact_check;
pub use orchestrator::{Pipeline, Stage};
pub use search::{biased_query, search};
pub use synthesis::synthesize;

use std::future::Future;
use std::time::Duration;

use crate::error::{CollaboratorError, PipelineError, Result};

/// Run a collaborator call, failing with a timeout error after `after`.
pub(crate) async fn bounded<T, F>(service: &'static str, after: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(after, call)
        .await
        .map_err(|_| PipelineError::from(CollaboratorError::Timeout { service, after }))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let value = bounded("llm", Duration::from_secs(1), async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_times_out() {
        let err = bounded("search", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Collaborator(CollaboratorError::Timeout {
                service: "search",
                ..
            })
        ));
    }
}
