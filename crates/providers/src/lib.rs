//! LLM provider implementations for reagent.
//!
//! All providers implement the `reagent_core::Provider` trait. The default
//! is the OpenAI chat completions API; any OpenAI-compatible endpoint works
//! via a custom base URL.

pub mod openai;

pub use openai::OpenAiProvider;
