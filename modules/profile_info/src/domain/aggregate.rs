use std::sync::Arc;

use tracing::instrument;

use crate::contract::error::ProfileError;
use crate::contract::model::ProfileCommand;
use crate::domain::projector::ProfileProjector;

/// Single entry point for profile mutations. Routes each command to its
/// projector handler; the match is exhaustive so every command variant has
/// exactly one handler.
#[derive(Clone)]
pub struct ProfileAggregate {
    projector: Arc<ProfileProjector>,
}

impl ProfileAggregate {
    pub fn new(projector: Arc<ProfileProjector>) -> Self {
        Self { projector }
    }

    #[instrument(name = "profile_info.aggregate.handle_command", skip(self, command))]
    pub async fn handle_command(&self, command: ProfileCommand) -> Result<(), ProfileError> {
        match command {
            ProfileCommand::LogOut => self.projector.log_out().await,
            ProfileCommand::SetNickname { nickname } => self.projector.set_nickname(nickname).await,
        }
    }
}
