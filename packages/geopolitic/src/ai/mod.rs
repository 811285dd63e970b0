//! Language model implementations.
//!
//! This module provides the reference implementation of the `LanguageModel`
//! trait. Callers can use it directly or implement their own.

mod openai;

pub use openai::{OpenAiModel, DEFAULT_MODEL};
