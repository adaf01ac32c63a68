use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the browsing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Page-load timeout applied to the session, in seconds.
    ///
    /// This is the driver-level bound on a hanging page; the verifier
    /// itself imposes no timeouts.
    #[serde(default = "default_page_load_timeout")]
    pub page_load_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            page_load_timeout_secs: default_page_load_timeout(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default page-load timeout in seconds
fn default_page_load_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.page_load_timeout_secs, 30);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:4444");

        let config: SessionConfig =
            serde_json::from_str(r#"{"webdriver_url": "http://localhost:9515"}"#).unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.page_load_timeout_secs, 30);
    }
}
