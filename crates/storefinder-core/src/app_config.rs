use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: PathBuf,
    /// Reference location used until the user locates themselves.
    pub default_address: String,
    pub geocoder_url: String,
    pub geocoder_language: String,
    pub geocoder_timeout_secs: u64,
    pub user_agent: String,
    pub maps_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field("default_address", &self.default_address)
            .field("geocoder_url", &self.geocoder_url)
            .field("geocoder_language", &self.geocoder_language)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_maps_api_key() {
        let cfg = AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            catalog_path: PathBuf::from("stores.yaml"),
            default_address: "here".to_string(),
            geocoder_url: "http://localhost".to_string(),
            geocoder_language: "ja".to_string(),
            geocoder_timeout_secs: 10,
            user_agent: "ua".to_string(),
            maps_api_key: Some("secret-key".to_string()),
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
