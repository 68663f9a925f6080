//! The [`Secret`] value type.
//!
//! A secret is a named credential record. Its metadata (`ID`, `Name`,
//! `Labels`, `Description`) is freely serializable; the username/password
//! payload is skipped by serde and only reachable through
//! [`Secret::credentials`] and [`Secret::cred_string`].

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;

use super::credentials::{Credentials, SecretString};
use super::error::{Result, SecretsError};

/// A named credential entry and its metadata.
///
/// Values are built with [`Secret::new`] and never mutated in place; the
/// `with_*` builders consume the value and return a new one.
///
/// # Example
///
/// ```rust
/// use secrets_api::Secret;
///
/// let secret = Secret::new("db-pass", "admin", "s3cr3t", "db credential");
/// let json = secret.to_json().unwrap();
/// assert!(json.contains("\"Name\": \"db-pass\""));
/// assert!(!json.contains("s3cr3t"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    #[serde(rename = "ID", default)]
    id: String,

    #[serde(rename = "Name", default)]
    name: String,

    #[serde(rename = "Labels", default)]
    labels: Option<BTreeMap<String, String>>,

    #[serde(rename = "Description", default)]
    description: String,

    #[serde(skip)]
    credentials: Credentials,
}

impl Secret {
    /// Builds a secret ready to be submitted to a backend.
    ///
    /// `ID` is left empty and labels are absent. Nothing is validated here;
    /// whether an empty name is acceptable is up to the backend.
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            labels: None,
            description: description.into(),
            credentials: Credentials::new(
                SecretString::new(username),
                SecretString::new(password),
            ),
        }
    }

    /// Returns a copy carrying the backend-assigned identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns a copy with the given labels, replacing any existing ones.
    pub fn with_labels<K, V>(mut self, labels: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Returns a copy with one additional label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.get_or_insert_with(BTreeMap::new).insert(key.into(), value.into());
        self
    }

    /// Returns a copy carrying the given credential payload.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Backend-assigned identifier, empty until the secret has been created.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels, or `None` if none were ever attached.
    pub fn labels(&self) -> Option<&BTreeMap<String, String>> {
        self.labels.as_ref()
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.as_ref()?.get(key).map(String::as_str)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The sensitive username/password payload.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Serializes the visible record as tab-indented JSON.
    ///
    /// The output has exactly the keys `ID`, `Name`, `Labels` and
    /// `Description`. Credentials are never included.
    ///
    /// Only the characters JSON requires are escaped; `<`, `>` and `&` are
    /// written literally rather than as `\u003c`-style escapes.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        self.serialize(&mut serializer)?;
        String::from_utf8(buf)
            .map_err(|e| SecretsError::internal(format!("JSON output is not UTF-8: {}", e)))
    }

    /// Serializes only the credential payload as compact JSON.
    pub fn cred_string(&self) -> Result<String> {
        self.credentials.to_json()
    }

    /// Parses a metadata document as produced by [`Secret::to_json`].
    ///
    /// The returned secret has an empty credential payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
