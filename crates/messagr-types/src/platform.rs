//! Platform identifiers, credentials and connection lifecycle types.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::ErrorKind;

/// A messaging platform the endpoint can collect from.
///
/// Closed set. Serialized as the variant name (`"Telegram"`, `"WhatsApp"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlatformId {
    Telegram,
    Slack,
    Discord,
    Twitter,
    Facebook,
    WhatsApp,
}

impl PlatformId {
    /// Every platform, in canonical order. Aggregated output follows this order.
    pub const ALL: [PlatformId; 6] = [
        PlatformId::Telegram,
        PlatformId::Slack,
        PlatformId::Discord,
        PlatformId::Twitter,
        PlatformId::Facebook,
        PlatformId::WhatsApp,
    ];

    /// Canonical display name, identical to the wire variant name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::Telegram => "Telegram",
            PlatformId::Slack => "Slack",
            PlatformId::Discord => "Discord",
            PlatformId::Twitter => "Twitter",
            PlatformId::Facebook => "Facebook",
            PlatformId::WhatsApp => "WhatsApp",
        }
    }

    /// Map a user-supplied identifier ("slack", "SLACK", "whatsapp") to a platform.
    ///
    /// The first letter is capitalized and the result is looked up
    /// case-insensitively, so "whatsapp" still resolves to `WhatsApp`.
    /// Anything that does not name a platform is `InvalidInput`; there is no
    /// fallback platform.
    pub fn from_identifier(identifier: &str) -> Result<Self, ErrorKind> {
        let mut chars = identifier.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        PlatformId::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(&capitalized))
            .ok_or_else(|| ErrorKind::InvalidInput(format!("unknown platform '{identifier}'")))
    }

    /// Credentials the platform needs before a connect attempt makes sense.
    pub fn required_credentials(&self) -> &'static [CredentialField] {
        use CredentialField::*;
        match self {
            PlatformId::Telegram => &[Token],
            PlatformId::Slack | PlatformId::Facebook => &[Token, ApiKey, ApiSecret, RedirectUri],
            PlatformId::Discord | PlatformId::Twitter | PlatformId::WhatsApp => {
                &[Token, ApiKey, ApiSecret]
            }
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformId::from_identifier(s)
    }
}

/// One field of an [`AuthConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Token,
    ApiKey,
    ApiSecret,
    RedirectUri,
}

impl CredentialField {
    /// Field name as used in `AuthConfig` and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::Token => "token",
            CredentialField::ApiKey => "api_key",
            CredentialField::ApiSecret => "api_secret",
            CredentialField::RedirectUri => "redirect_uri",
        }
    }

    /// Human-readable label for prompts.
    pub fn label(&self) -> &'static str {
        match self {
            CredentialField::Token => "Access token",
            CredentialField::ApiKey => "API key / client ID",
            CredentialField::ApiSecret => "API secret / client secret",
            CredentialField::RedirectUri => "Redirect URI",
        }
    }

    /// Whether the value should be read without echo.
    pub fn is_secret(&self) -> bool {
        matches!(self, CredentialField::Token | CredentialField::ApiSecret)
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials submitted with a connect request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub platform: PlatformId,
    pub token: String,
    #[serde(with = "crate::codec::seq", default)]
    pub api_key: Option<String>,
    #[serde(with = "crate::codec::seq", default)]
    pub api_secret: Option<String>,
    #[serde(with = "crate::codec::seq", default)]
    pub redirect_uri: Option<String>,
}

impl AuthConfig {
    /// Token-only credentials; enough for Telegram.
    pub fn new(platform: PlatformId, token: impl Into<String>) -> Self {
        Self {
            platform,
            token: token.into(),
            api_key: None,
            api_secret: None,
            redirect_uri: None,
        }
    }

    /// Current value of a credential field, if set.
    pub fn field(&self, field: CredentialField) -> Option<&str> {
        match field {
            CredentialField::Token => Some(self.token.as_str()),
            CredentialField::ApiKey => self.api_key.as_deref(),
            CredentialField::ApiSecret => self.api_secret.as_deref(),
            CredentialField::RedirectUri => self.redirect_uri.as_deref(),
        }
    }

    /// Set a credential field.
    pub fn set_field(&mut self, field: CredentialField, value: String) {
        match field {
            CredentialField::Token => self.token = value,
            CredentialField::ApiKey => self.api_key = Some(value),
            CredentialField::ApiSecret => self.api_secret = Some(value),
            CredentialField::RedirectUri => self.redirect_uri = Some(value),
        }
    }

    /// Required fields for this platform that are absent or blank.
    pub fn missing_credentials(&self) -> Vec<CredentialField> {
        self.platform
            .required_credentials()
            .iter()
            .copied()
            .filter(|f| self.field(*f).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }
}

// Secrets stay out of Debug output (and therefore out of tracing fields).
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AuthConfig")
            .field("platform", &self.platform)
            .field("token", &"[redacted]")
            .field("api_key", &self.api_key)
            .field("api_secret", &redact(&self.api_secret))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Confirmation returned by a successful connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectResult(pub String);

impl fmt::Display for ConnectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connection lifecycle of a single platform as seen by the registry.
///
/// - Disconnected -> Connecting -> Connected
/// - Connected -> Disconnecting -> Disconnected
///
/// A failed transition falls back to the state it started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkState::Disconnected => write!(f, "disconnected"),
            LinkState::Connecting => write!(f, "connecting"),
            LinkState::Connected => write!(f, "connected"),
            LinkState::Disconnecting => write!(f, "disconnecting"),
        }
    }
}

/// Outcome of a platform sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub platform: PlatformId,
    /// Number of messages the endpoint pulled in.
    pub synced: u64,
}
