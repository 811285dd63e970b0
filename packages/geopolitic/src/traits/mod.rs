//! Collaborator abstractions.
//!
//! The pipeline only knows these traits; concrete services (OpenAI, Tavily)
//! and test doubles plug in behind `Arc<dyn ...>` handles.

pub mod llm;
pub mod searcher;
