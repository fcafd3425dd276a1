//! Revoked session ids
//!
//! Entries are kept until the token they belong to would have expired
//! anyway, then pruned on the next revocation.

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct RevokedSessions {
    /// jti -> token expiry (Unix timestamp)
    revoked: RwLock<HashMap<String, i64>>,
}

impl RevokedSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn revoke(&self, jti: &str, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(jti.to_string(), expires_at);
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.read().await.contains_key(jti)
    }

    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke() {
        let sessions = RevokedSessions::new();
        let exp = Utc::now().timestamp() + 3600;

        assert!(!sessions.is_revoked("abc").await);
        sessions.revoke("abc", exp).await;
        assert!(sessions.is_revoked("abc").await);
        assert!(!sessions.is_revoked("def").await);
    }

    #[tokio::test]
    async fn test_expired_entries_pruned() {
        let sessions = RevokedSessions::new();
        let now = Utc::now().timestamp();

        sessions.revoke("old", now - 10).await;
        sessions.revoke("new", now + 3600).await;

        assert_eq!(sessions.len().await, 1);
        assert!(sessions.is_revoked("new").await);
    }
}
