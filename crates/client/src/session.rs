//! Authenticated session state.
//!
//! A [`Session`] is owned by the caller and handed to each operation that
//! needs it. Only the sign-in paths mutate it, through the methods below.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::TokenError;
use crate::token::{decode_identity, Identity};

/// How long a freshly issued token is treated as valid.
pub const TOKEN_LIFETIME: Duration = Duration::hours(2);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    access_token: Option<String>,
    email: Option<String>,
    user_type: Option<String>,
    logged_in: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    expires_at: Option<OffsetDateTime>,
}

impl Session {
    /// A signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful sign-in. The token is stored verbatim, including
    /// any `Bearer ` prefix, since that is what the backend expects back.
    pub fn establish(&mut self, identity: Identity, token: &str, now: OffsetDateTime) {
        self.email = Some(identity.email);
        self.user_type = Some(identity.role);
        self.access_token = Some(token.to_string());
        self.logged_in = true;
        self.expires_at = Some(now + TOKEN_LIFETIME);
        tracing::info!(
            email = self.email.as_deref().unwrap_or_default(),
            role = self.user_type.as_deref().unwrap_or_default(),
            "session established"
        );
    }

    /// Decode `token` and establish the session from its identity. On error
    /// the session is left as it was.
    pub fn establish_from_token(
        &mut self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<(), TokenError> {
        let identity = decode_identity(token)?;
        self.establish(identity, token, now);
        Ok(())
    }

    /// Forget the token and identity.
    pub fn log_out(&mut self) {
        *self = Session::default();
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn user_type(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expires_at
    }

    /// Advisory only: the client keeps sending the token after expiry and
    /// lets the server decide.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::encode_test_token;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn establish_sets_identity_and_expiry() {
        let now = datetime!(2024-03-01 12:00 UTC);
        let mut session = Session::new();
        session.establish(
            Identity {
                email: "ana@example.org".into(),
                role: "Recipient".into(),
            },
            "Bearer abc",
            now,
        );

        assert!(session.is_logged_in());
        assert_eq!(session.email(), Some("ana@example.org"));
        assert_eq!(session.user_type(), Some("Recipient"));
        assert_eq!(session.access_token(), Some("Bearer abc"));
        assert_eq!(session.expires_at(), Some(datetime!(2024-03-01 14:00 UTC)));
        assert!(!session.is_expired(now));
        assert!(session.is_expired(datetime!(2024-03-01 14:00 UTC)));
    }

    #[test]
    fn bad_token_leaves_session_untouched() {
        let mut session = Session::new();
        let result = session.establish_from_token("garbage", OffsetDateTime::now_utc());
        assert!(result.is_err());
        assert_eq!(session, Session::new());
    }

    #[test]
    fn establish_from_token_decodes_identity() {
        let token = encode_test_token(&json!({"identity": ["d@b.org", "Diner"]}));
        let mut session = Session::new();
        session
            .establish_from_token(&token, OffsetDateTime::now_utc())
            .unwrap();
        assert_eq!(session.email(), Some("d@b.org"));
        assert_eq!(session.access_token(), Some(token.as_str()));
    }

    #[test]
    fn log_out_clears_everything() {
        let mut session = Session::new();
        session.establish(
            Identity {
                email: "a@b.org".into(),
                role: "Admin".into(),
            },
            "Bearer t",
            OffsetDateTime::now_utc(),
        );
        session.log_out();
        assert!(!session.is_logged_in());
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn serde_round_trip_keeps_expiry() {
        let mut session = Session::new();
        session.establish(
            Identity {
                email: "a@b.org".into(),
                role: "Recipient".into(),
            },
            "Bearer t",
            datetime!(2024-03-01 12:00 UTC),
        );
        let text = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&text).unwrap();
        assert_eq!(back, session);
    }
}
