//! Pure catalog models for inter-module communication (no serde).
//! Wire/storage representations live at the infra edges.

/// A catalog item as fetched from the upstream listing.
///
/// `page` is recorded at write time and is authoritative for cursor
/// bookkeeping; the contract does not support re-tagging an item's page
/// other than by re-inserting it.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePreview {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub rating: Option<f64>,
    pub page: i32,
}

/// Paging cursor record: maps a movie id to the page it was fetched under.
///
/// Exactly one key exists per cached movie while the cache is populated;
/// keys are cleared together with the movies they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteKey {
    pub movie_id: i64,
    pub page: i32,
}

/// Favorites set member, keyed by movie id and scoped per user.
/// Presence means favorited; there is no tombstone state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Favorite {
    pub movie_id: i64,
}

impl Favorite {
    pub fn new(movie_id: i64) -> Self {
        Self { movie_id }
    }
}
