//! Session credentials
//!
//! Created by login or from previously issued token material, refreshed in
//! place when the transport re-authenticates, and blanked on logout.

use std::fmt;

/// Credentials for one authenticated session
///
/// A session is valid when both the account alias and the bearer token are
/// non-empty. The plaintext password is kept so an expired token can be
/// renewed without prompting; sessions restored from token material alone
/// have no password and cannot be renewed.
///
/// Only one writer may hold a session at a time. Operations that can refresh
/// the token take `&mut Credentials`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Option<String>,
    account_alias: String,
    location_alias: String,
    bearer_token: String,
}

impl Credentials {
    /// Credentials returned by a successful login
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        account_alias: impl Into<String>,
        location_alias: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
            account_alias: account_alias.into(),
            location_alias: location_alias.into(),
            bearer_token: bearer_token.into(),
        }
    }

    /// Credentials rebuilt from previously issued token material, without a
    /// password.
    pub fn from_token(
        username: impl Into<String>,
        account_alias: impl Into<String>,
        location_alias: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: None,
            account_alias: account_alias.into(),
            location_alias: location_alias.into(),
            bearer_token: bearer_token.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.account_alias.is_empty() && !self.bearer_token.is_empty()
    }

    /// Blank every field. The session cannot be used afterwards.
    pub fn clear(&mut self) {
        self.username.clear();
        self.password = None;
        self.account_alias.clear();
        self.location_alias.clear();
        self.bearer_token.clear();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn account_alias(&self) -> &str {
        &self.account_alias
    }

    pub fn location_alias(&self) -> &str {
        &self.location_alias
    }

    /// Bearer token for the `Authorization` header
    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// Password retained for re-authentication, if the session has one
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Drop the alias and token ahead of a re-authentication attempt, so a
    /// failed attempt leaves the session invalid rather than stale.
    pub fn invalidate_token(&mut self) {
        self.account_alias.clear();
        self.location_alias.clear();
        self.bearer_token.clear();
    }

    /// Install the alias and token issued by a re-authentication
    pub fn refresh(
        &mut self,
        account_alias: impl Into<String>,
        location_alias: impl Into<String>,
        bearer_token: impl Into<String>,
    ) {
        self.account_alias = account_alias.into();
        self.location_alias = location_alias.into();
        self.bearer_token = bearer_token.into();
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("account_alias", &self.account_alias)
            .field("location_alias", &self.location_alias)
            .field("bearer_token", &if self.bearer_token.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}
