//! Business logic for OncoChat.
//!
//! - [`catalog`]: canned replies for common opening messages
//! - [`session`]: bounded, expiring per-session transcripts and the sweeper task
//! - [`llm`]: provider trait and the ordered model fallback client
//! - [`chat`]: the request orchestration that ties the above together

pub mod catalog;
pub mod chat;
pub mod llm;
pub mod session;
