//! # reagent-core
//!
//! Domain types, traits, and error definitions for the reagent chatbot.
//! This crate has no framework dependencies; it defines the domain
//! model that all other crates implement against.
//!
//! The `Provider` trait abstracts the LLM backend, the `Tool` trait
//! abstracts agent capabilities, and `Conversation`/`Message` are the
//! value objects that flow between them. Implementations live in their
//! respective crates so they can be swapped (or mocked in tests) without
//! touching the agent loop.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, ToolError};
pub use message::{Conversation, Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use tool::{Tool, ToolCall, ToolResult, ToolRegistry};
