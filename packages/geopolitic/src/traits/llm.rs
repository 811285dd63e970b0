//! Language model trait.

use async_trait::async_trait;

use crate::error::Result;

/// A chat model asked for a single JSON object per call.
///
/// Implementations send `system` and `user` as the conversation and return
/// the parsed reply. A reply that is not valid JSON is an error
/// ([`CollaboratorError::MalformedResponse`](crate::error::CollaboratorError));
/// checking the shape of the object is left to the caller.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<serde_json::Value>;
}
