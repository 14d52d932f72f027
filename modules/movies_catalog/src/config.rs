use serde::{Deserialize, Serialize};

/// Configuration for the movies_catalog module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoviesConfig {
    /// Which backend serves the repository contract. Selection happens once,
    /// at construction time.
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_remote_base_url")]
    pub remote_base_url: String,
    /// Poll cadence of the HTTP store's change-notification stream.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Local persistent cache only.
    #[default]
    Local,
    /// Remote store of record only.
    Remote,
    /// Writes go to the remote store first and are mirrored into the local
    /// cache; reads are served locally.
    WriteThrough,
}

impl Default for MoviesConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            remote_base_url: default_remote_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_remote_base_url() -> String {
    "http://documents.local".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        let config = MoviesConfig::default();
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn deserializes_backend_kind() {
        let config: MoviesConfig =
            serde_json::from_str(r#"{"backend": "write_through"}"#).expect("Should deserialize");
        assert_eq!(config.backend, BackendKind::WriteThrough);
        assert_eq!(config.remote_base_url, "http://documents.local");
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<MoviesConfig>(r#"{"paging": 3}"#);
        assert!(result.is_err());
    }
}
