use serde::Deserialize;

/// Module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Upper bound on nickname length, in characters.
    #[serde(default = "default_max_nickname_length")]
    pub max_nickname_length: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            max_nickname_length: default_max_nickname_length(),
        }
    }
}

fn default_max_nickname_length() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let config: ProfileConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_nickname_length, 50);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<ProfileConfig>(r#"{"max_nick": 10}"#);
        assert!(result.is_err());
    }
}
