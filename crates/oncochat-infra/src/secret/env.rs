//! Environment variable credential provider.
//!
//! The Gemini API key is read from `GEMINI_API_KEY` once at startup. An
//! empty value is treated the same as an unset one, so `GEMINI_API_KEY=`
//! in a `.env`-style deployment still runs the server in degraded mode.

use secrecy::{ExposeSecret, SecretString};

/// Name of the environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Read-only credential provider backed by environment variables.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    var: String,
}

impl EnvCredentialProvider {
    /// Provider for the standard `GEMINI_API_KEY` variable.
    pub fn new() -> Self {
        Self::with_var(GEMINI_API_KEY_VAR)
    }

    /// Provider for a custom variable name.
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }

    /// The API key, or `None` if unset, empty, or not valid Unicode.
    pub fn api_key(&self) -> Option<SecretString> {
        match std::env::var(&self.var) {
            Ok(val) if !val.is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(var = %self.var, "Ignoring credential with invalid Unicode");
                None
            }
        }
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Character length of a secret, for diagnostics that must not reveal it.
pub fn secret_len(secret: &SecretString) -> usize {
    secret.expose_secret().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_existing_var() {
        let key = "ONCOCHAT_TEST_ENV_PRESENT_KEY";
        // SAFETY: test-only, unique variable name, no concurrent reads of it.
        unsafe { std::env::set_var(key, "AIza-test-value") };

        let provider = EnvCredentialProvider::with_var(key);
        let secret = provider.api_key().expect("key should be present");
        assert_eq!(secret.expose_secret(), "AIza-test-value");
        assert_eq!(secret_len(&secret), 15);

        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn test_missing_var_is_none() {
        let provider = EnvCredentialProvider::with_var("ONCOCHAT_TEST_ENV_MISSING_KEY_XYZ");
        assert!(provider.api_key().is_none());
    }

    #[test]
    fn test_empty_var_is_none() {
        let key = "ONCOCHAT_TEST_ENV_EMPTY_KEY";
        // SAFETY: test-only, unique variable name, no concurrent reads of it.
        unsafe { std::env::set_var(key, "") };

        assert!(EnvCredentialProvider::with_var(key).api_key().is_none());

        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn test_default_var_name() {
        assert_eq!(EnvCredentialProvider::default().var(), "GEMINI_API_KEY");
    }
}
