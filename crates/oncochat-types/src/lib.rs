//! Shared domain types for OncoChat.
//!
//! This crate contains the core domain types used across the OncoChat backend:
//! conversation turns and sessions, LLM request/response shapes, server
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
