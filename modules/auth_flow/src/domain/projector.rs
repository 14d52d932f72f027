use std::sync::Arc;

use tracing::instrument;

use crate::contract::error::AuthError;
use crate::domain::ports::CredentialsPort;
use crate::domain::write::UserLogin;

/// Forwards a validated write model to the sign-in collaborator.
/// Collaborator failures propagate unchanged.
pub struct AuthProjector {
    credentials: Arc<dyn CredentialsPort>,
}

impl AuthProjector {
    pub fn new(credentials: Arc<dyn CredentialsPort>) -> Self {
        Self { credentials }
    }

    #[instrument(name = "auth_flow.projector.project", skip(self, login))]
    pub async fn project(&self, login: UserLogin) -> Result<(), AuthError> {
        self.credentials.sign_in(&login).await?;
        Ok(())
    }
}
