//! Wire DTOs for the document store. Contract models stay serde-free; the
//! translation to and from JSON happens only at this edge.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use synckit::StoreError;

use crate::contract::model::{Favorite, MoviePreview, RemoteKey};

/// `None` fields are skipped on serialization so a merge-set never erases a
/// stored field with an absent one.
#[derive(Debug, Serialize, Deserialize)]
pub struct MovieDoc {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub page: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteKeyDoc {
    pub movie_id: i64,
    pub page: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteDoc {
    pub movie_id: i64,
}

impl From<MoviePreview> for MovieDoc {
    fn from(m: MoviePreview) -> Self {
        Self {
            id: m.id,
            title: m.title,
            poster_url: m.poster_url,
            rating: m.rating,
            page: m.page,
        }
    }
}

impl From<MovieDoc> for MoviePreview {
    fn from(d: MovieDoc) -> Self {
        Self {
            id: d.id,
            title: d.title,
            poster_url: d.poster_url,
            rating: d.rating,
            page: d.page,
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::serialization(e.to_string()))
}

pub fn encode_movie(movie: MoviePreview) -> Result<Value, StoreError> {
    to_value(&MovieDoc::from(movie))
}

pub fn decode_movie(data: Value) -> Result<MoviePreview, StoreError> {
    let doc: MovieDoc =
        serde_json::from_value(data).map_err(|e| StoreError::serialization(e.to_string()))?;
    Ok(doc.into())
}

pub fn encode_remote_key(key: RemoteKey) -> Result<Value, StoreError> {
    to_value(&RemoteKeyDoc {
        movie_id: key.movie_id,
        page: key.page,
    })
}

pub fn decode_remote_key(data: Value) -> Result<RemoteKey, StoreError> {
    let doc: RemoteKeyDoc =
        serde_json::from_value(data).map_err(|e| StoreError::serialization(e.to_string()))?;
    Ok(RemoteKey {
        movie_id: doc.movie_id,
        page: doc.page,
    })
}

pub fn encode_favorite(favorite: Favorite) -> Result<Value, StoreError> {
    to_value(&FavoriteDoc {
        movie_id: favorite.movie_id,
    })
}

pub fn decode_favorite(data: Value) -> Result<Favorite, StoreError> {
    let doc: FavoriteDoc =
        serde_json::from_value(data).map_err(|e| StoreError::serialization(e.to_string()))?;
    Ok(Favorite::new(doc.movie_id))
}
