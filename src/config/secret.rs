//! Secure handling of the ERP API token
//!
//! The token is wrapped in `secrecy::Secret`, which zeroes the memory on drop
//! and redacts `Debug` output. Code that needs the raw value has to call
//! `expose_secret()` explicitly, which keeps accidental logging out of
//! `tracing` fields.
//!
//! # Example
//!
//! ```rust
//! use maintenance_report::config::{secret_string, SecretString};
//! use secrecy::ExposeSecret;
//!
//! let token: SecretString = secret_string("api-key:api-secret".to_string());
//! let raw: &str = token.expose_secret().as_ref();
//! assert_eq!(raw, "api-key:api-secret");
//! assert!(!format!("{token:?}").contains("api-secret"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String payload stored inside a [`SecretString`]
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Masked form for operator output: only the last four characters survive
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string used for credentials in configuration
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("key:secret".to_string());
        assert_eq!(secret.expose_secret(), "key:secret");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("3ee8d039:6baa3612".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("6baa3612"));
    }

    #[test]
    fn test_masked() {
        assert_eq!(
            secret_string("abcdefgh:1234wxyz".to_string())
                .expose_secret()
                .masked(),
            "****wxyz"
        );
        assert_eq!(secret_string("short".to_string()).expose_secret().masked(), "****");
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            api_token: SecretString,
        }

        let section: Section = toml::from_str("api_token = \"k:s\"").unwrap();
        assert_eq!(section.api_token.expose_secret(), "k:s");
        assert!(!section.api_token.expose_secret().is_empty());
    }
}
