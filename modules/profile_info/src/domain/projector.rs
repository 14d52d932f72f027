use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{instrument, warn};
use url::Url;

use synckit::{EventPublisher, IdentityProvider, Scope};

use crate::config::ProfileConfig;
use crate::contract::error::ProfileError;
use crate::domain::events::ProfileDomainEvent;
use crate::domain::ports::{ProfileStore, SessionPort};

/// Materialized profile view. Built from a [`StoredProfile`] on hydration and
/// patched in place after each successful write, so readers never observe a
/// window where a committed change is missing.
///
/// [`StoredProfile`]: crate::domain::ports::StoredProfile
#[derive(Debug, Clone, Default)]
pub(crate) struct ProfileView {
    pub nickname: Option<String>,
    pub avatar_url: Option<Url>,
}

/// Applies profile commands: validates, persists through [`ProfileStore`],
/// refreshes the in-memory view, then publishes the corresponding domain
/// event. Reads go through [`ProfileProjection`] and never touch storage.
///
/// [`ProfileProjection`]: crate::domain::projection::ProfileProjection
pub struct ProfileProjector {
    store: Arc<dyn ProfileStore>,
    session: Arc<dyn SessionPort>,
    events: Arc<dyn EventPublisher<ProfileDomainEvent>>,
    identity: Arc<dyn IdentityProvider>,
    config: ProfileConfig,
    view: ArcSwapOption<ProfileView>,
}

impl ProfileProjector {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        session: Arc<dyn SessionPort>,
        events: Arc<dyn EventPublisher<ProfileDomainEvent>>,
        identity: Arc<dyn IdentityProvider>,
        config: ProfileConfig,
    ) -> Self {
        Self {
            store,
            session,
            events,
            identity,
            config,
            view: ArcSwapOption::const_empty(),
        }
    }

    fn scope(&self) -> Scope {
        Scope::resolve(self.identity.as_ref())
    }

    /// Loads the stored profile for the current scope into the view.
    /// Call once after construction and again whenever the identity changes.
    #[instrument(name = "profile_info.projector.refresh", skip(self))]
    pub async fn refresh(&self) -> Result<(), ProfileError> {
        let scope = self.scope();
        let stored = self.store.load(&scope).await?;
        let view = stored.map(|profile| {
            let avatar_url = profile.avatar_url.as_deref().and_then(|raw| {
                Url::parse(raw)
                    .map_err(|err| {
                        warn!(scope = %scope, error = %err, "discarding malformed avatar url");
                    })
                    .ok()
            });
            Arc::new(ProfileView {
                nickname: profile.nickname,
                avatar_url,
            })
        });
        self.view.store(view);
        Ok(())
    }

    /// Persists a new nickname, then patches the view so the change is
    /// visible to sync readers before this call returns.
    #[instrument(name = "profile_info.projector.set_nickname", skip(self, nickname))]
    pub async fn set_nickname(&self, nickname: String) -> Result<(), ProfileError> {
        let nickname = nickname.trim().to_owned();
        if nickname.is_empty() {
            return Err(ProfileError::validation("nickname", "must not be empty"));
        }
        if nickname.chars().count() > self.config.max_nickname_length {
            return Err(ProfileError::validation(
                "nickname",
                format!(
                    "must be at most {} characters",
                    self.config.max_nickname_length
                ),
            ));
        }

        let scope = self.scope();
        self.store.set_nickname(&scope, &nickname).await?;

        let current = self.view.load_full();
        let mut next = current.as_deref().cloned().unwrap_or_default();
        next.nickname = Some(nickname.clone());
        self.view.store(Some(Arc::new(next)));

        self.events
            .publish(&ProfileDomainEvent::NicknameChanged { nickname });
        Ok(())
    }

    /// Tears down the session, then clears the view. Ordering matters: if
    /// sign-out fails the profile stays readable and no event is emitted.
    /// `LoggedOut` is published exactly once per successful call.
    #[instrument(name = "profile_info.projector.log_out", skip(self))]
    pub async fn log_out(&self) -> Result<(), ProfileError> {
        self.session
            .sign_out()
            .await
            .map_err(|err| ProfileError::session(err.to_string()))?;
        self.view.store(None);
        self.events.publish(&ProfileDomainEvent::LoggedOut);
        Ok(())
    }

    pub(crate) fn current_view(&self) -> Option<Arc<ProfileView>> {
        self.view.load_full()
    }
}
