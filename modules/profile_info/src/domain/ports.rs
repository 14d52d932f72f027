use async_trait::async_trait;
use synckit::{Scope, StoreError};

/// Profile fields as persisted, before any view-level interpretation.
/// `avatar_url` stays a raw string here; URL parsing happens when the
/// materialized view is built, so a malformed value degrades to "no avatar"
/// instead of poisoning the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredProfile {
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}

/// Scoped persistence for profile fields.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the stored profile for `scope`, or `None` when the scope has
    /// never written one.
    async fn load(&self, scope: &Scope) -> Result<Option<StoredProfile>, StoreError>;

    /// Upserts the nickname for `scope`, leaving other fields untouched.
    async fn set_nickname(&self, scope: &Scope, nickname: &str) -> Result<(), StoreError>;
}

/// Session teardown boundary. Implementations talk to whatever identity
/// backend owns the authenticated session.
#[async_trait]
pub trait SessionPort: Send + Sync {
    async fn sign_out(&self) -> Result<(), StoreError>;
}
