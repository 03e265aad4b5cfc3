//! Credential lookup.
//!
//! - `env`: reads the Gemini API key from the process environment

pub mod env;

pub use env::{EnvCredentialProvider, GEMINI_API_KEY_VAR, secret_len};
