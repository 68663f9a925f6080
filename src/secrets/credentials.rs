//! Credential payload carried by a [`Secret`](super::Secret).
//!
//! The username/password pair is held in [`SecretString`] values. They print
//! and serialize as `[REDACTED]` and are zeroed when dropped, so the payload
//! cannot leak through `Debug` output, structured logs or a generic
//! `serde_json::to_string` of a containing type. The only way to get the
//! plaintext out is [`SecretString::expose_secret`] or
//! [`Credentials::to_json`].

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::Result;

const REDACTED: &str = "[REDACTED]";

/// A string that redacts itself in `Debug`, `Display` and serialization.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the plaintext. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString({})", REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Username/password pair stored alongside a secret's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: SecretString,
    password: SecretString,
}

/// Accepts only a JSON object. Missing keys stay empty, unknown keys are ignored.
impl<'de> Deserialize<'de> for Credentials {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CredentialsVisitor;

        impl<'de> Visitor<'de> for CredentialsVisitor {
            type Value = Credentials;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with \"username\" and \"password\" strings")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Credentials, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut creds = Credentials::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "username" => creds.username = map.next_value()?,
                        "password" => creds.password = map.next_value()?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(creds)
            }
        }

        deserializer.deserialize_map(CredentialsVisitor)
    }
}

impl Credentials {
    pub fn new(username: impl Into<SecretString>, password: impl Into<SecretString>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn username(&self) -> &SecretString {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Encodes the plaintext pair as compact JSON.
    ///
    /// Keys come out sorted: `{"password":"...","username":"..."}`.
    pub fn to_json(&self) -> Result<String> {
        let mut creds = BTreeMap::new();
        creds.insert("username", self.username.expose_secret());
        creds.insert("password", self.password.expose_secret());
        Ok(serde_json::to_string(&creds)?)
    }

    /// Parses a document produced by [`Credentials::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
