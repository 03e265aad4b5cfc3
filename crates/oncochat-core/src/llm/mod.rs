//! LLM provider abstractions for OncoChat.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `CompletionClient`: ordered fallback across candidate models
//! - `prompt`: the scope-establishing turns sent with every request

pub mod box_provider;
pub mod client;
pub mod prompt;
pub mod provider;
