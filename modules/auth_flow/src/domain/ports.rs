use async_trait::async_trait;
use synckit::StoreError;

use crate::domain::write::UserLogin;

/// Sign-in boundary. Implementations exchange the credentials for an
/// authenticated session with whatever identity backend is configured.
#[async_trait]
pub trait CredentialsPort: Send + Sync {
    async fn sign_in(&self, login: &UserLogin) -> Result<(), StoreError>;
}
