use std::sync::Arc;

use tracing::instrument;

use crate::contract::error::AuthError;
use crate::contract::model::AuthCommand;
use crate::domain::projector::AuthProjector;
use crate::domain::write::UserLogin;

/// Single entry point for auth mutations. Validation runs before any
/// collaborator call, so a malformed payload never reaches the identity
/// backend.
#[derive(Clone)]
pub struct AuthAggregate {
    projector: Arc<AuthProjector>,
}

impl AuthAggregate {
    pub fn new(projector: Arc<AuthProjector>) -> Self {
        Self { projector }
    }

    #[instrument(name = "auth_flow.aggregate.handle_command", skip(self, command))]
    pub async fn handle_command(&self, command: AuthCommand) -> Result<(), AuthError> {
        match command {
            AuthCommand::Login { email, password } => {
                if email.trim().is_empty() {
                    return Err(AuthError::validation("email", "must not be empty"));
                }
                if password.trim().is_empty() {
                    return Err(AuthError::validation("password", "must not be empty"));
                }
                let login = UserLogin::new(&email, &password);
                self.projector.project(login).await
            }
        }
    }
}
