use crate::{ConfigError, FromEnv};
use std::env;

/// Browser origins allowed to call the API.
///
/// Loaded from `FRONTEND_URL`, which may hold a single origin or a
/// comma-separated list. An empty list means no cross-origin request is
/// accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    fn parse(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = env::var("FRONTEND_URL")
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default();

        Ok(Self { allowed_origins })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_config_single_origin() {
        temp_env::with_var("FRONTEND_URL", Some("http://localhost:5173"), || {
            let config = CorsConfig::from_env().unwrap();
            assert_eq!(config.allowed_origins, vec!["http://localhost:5173"]);
            assert!(config.is_allowed("http://localhost:5173"));
            assert!(!config.is_allowed("http://evil.example"));
        });
    }

    #[test]
    fn test_cors_config_list_is_trimmed() {
        temp_env::with_var(
            "FRONTEND_URL",
            Some(" https://app.example.com/ , http://localhost:3000,,"),
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(
                    config.allowed_origins,
                    vec!["https://app.example.com", "http://localhost:3000"]
                );
            },
        );
    }

    #[test]
    fn test_cors_config_unset_allows_nothing() {
        temp_env::with_var_unset("FRONTEND_URL", || {
            let config = CorsConfig::from_env().unwrap();
            assert!(config.allowed_origins.is_empty());
            assert!(!config.is_allowed("http://localhost:5173"));
        });
    }
}
