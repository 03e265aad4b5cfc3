//! Chat orchestration for OncoChat.
//!
//! `ChatService` validates a message, answers opening messages from the
//! response catalog, forwards everything else to the completion client, and
//! degrades to static replies when the model path is unavailable.

pub mod replies;
pub mod service;

pub use service::{ChatReply, ChatService, ReplySource};
