use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Role a token plays in the session lifecycle.
///
/// Access tokens open protected routes; refresh tokens are only accepted
/// by the refresh flow. The role travels inside the token as the `type`
/// claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by every session token.
///
/// Field names follow RFC 7519 so standard tooling can read them; `type`
/// is the only private claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (login of the authenticated user)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token role
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    /// Create claims issued now that expire after `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Login the token is bound to
    /// * `issuer` - Issuer string stamped into `iss`
    /// * `token_type` - Access or refresh role
    /// * `ttl` - Lifetime of the token
    pub fn new(
        subject: impl ToString,
        issuer: impl ToString,
        token_type: TokenType,
        ttl: Duration,
    ) -> Self {
        Self::issued_at(subject, issuer, token_type, Utc::now(), ttl)
    }

    /// Create claims with an explicit issue instant.
    pub fn issued_at(
        subject: impl ToString,
        issuer: impl ToString,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            token_type,
        }
    }

    pub fn is_access(&self) -> bool {
        self.token_type == TokenType::Access
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}
