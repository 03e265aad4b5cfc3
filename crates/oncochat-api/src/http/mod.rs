//! HTTP/REST API layer for OncoChat.
//!
//! Axum-based JSON API served at the root and under `/api`, with permissive
//! CORS and optional static hosting of the web frontend.

pub mod error;
pub mod handlers;
pub mod router;
