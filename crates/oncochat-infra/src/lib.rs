//! Infrastructure layer for OncoChat.
//!
//! Contains implementations of the traits defined in `oncochat-core`:
//! the Gemini REST provider, the environment credential lookup, and the
//! TOML configuration loader.

pub mod config;
pub mod llm;
pub mod secret;
