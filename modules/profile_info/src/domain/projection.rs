use std::sync::Arc;

use url::Url;

use crate::domain::projector::ProfileProjector;

/// Synchronous read model over the projector's materialized view.
///
/// Getters never perform I/O and never block on a write in flight: they see
/// the last view the projector committed. `None` means "not loaded or logged
/// out", which callers render the same way.
#[derive(Clone)]
pub struct ProfileProjection {
    projector: Arc<ProfileProjector>,
}

impl ProfileProjection {
    pub fn new(projector: Arc<ProfileProjector>) -> Self {
        Self { projector }
    }

    pub fn nickname(&self) -> Option<String> {
        self.projector
            .current_view()
            .and_then(|view| view.nickname.clone())
    }

    pub fn avatar(&self) -> Option<Url> {
        self.projector
            .current_view()
            .and_then(|view| view.avatar_url.clone())
    }
}
