use std::fmt;

/// Scope used when no identity is available.
pub const GUEST_SCOPE: &str = "guest";

/// Port for the identity collaborator. Implementations expose the current
/// session's stable user id, or `None` when unauthenticated.
///
/// Repositories re-resolve the identity on every call, so a session change
/// takes effect on the next operation without any cache invalidation.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Option<String>;
}

/// Namespace key partitioning all stored entities by user identity.
///
/// Never persisted as its own entity; only used as a key prefix / path
/// segment by the storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope(String);

impl Scope {
    /// Resolve the scope for the current session, falling back to the
    /// well-known guest scope when no identity is present.
    pub fn resolve(identity: &dyn IdentityProvider) -> Self {
        match identity.current_identity() {
            Some(id) => Scope(id),
            None => Scope(GUEST_SCOPE.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_guest(&self) -> bool {
        self.0 == GUEST_SCOPE
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Scope(value.to_string())
    }
}

/// Fixed identity for tests and simple wiring.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    id: Option<String>,
}

impl StaticIdentity {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { id: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<String> {
        self.id.clone()
    }
}
