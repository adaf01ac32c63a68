// Re-export modules
pub mod config;
pub mod keywords;
pub mod parsers;
pub mod resolver;
pub mod results;
pub mod session;
pub mod spec;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types for convenience
pub use results::{PageResult, RunReport};
pub use spec::PageSpec;
pub use verifier::VerifyError;

use config::SessionConfig;
use session::WebSession;
use std::path::Path;

/// Builder for a verification run over one or more expected page trees
pub struct SiteCheck {
    specs: Vec<PageSpec>,
    config: SessionConfig,
}

impl SiteCheck {
    /// Create a new run over the given root specs
    pub fn new(specs: Vec<PageSpec>) -> Self {
        Self {
            specs,
            config: SessionConfig::default(),
        }
    }

    /// Load the root specs from a JSON file
    pub fn from_spec_file<P: AsRef<Path>>(path: P) -> Result<Self, spec::SpecError> {
        Ok(Self::new(spec::load_file(path)?))
    }

    /// Apply a session configuration
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the session configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = SessionConfig::from_file(path)?;
        Ok(self)
    }

    /// Override the WebDriver URL
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Override the driver-level page-load timeout
    pub fn with_page_load_timeout(mut self, seconds: u64) -> Self {
        self.config.page_load_timeout_secs = seconds;
        self
    }

    /// Run the verification and produce a report.
    ///
    /// Validates the spec trees, connects a single browsing session, walks
    /// every root tree sequentially, and closes the session whether or not
    /// traversal succeeded. Per-page problems land in the report; only
    /// configuration and session errors are returned as `Err`.
    pub async fn run(self) -> Result<RunReport, VerifyError> {
        spec::validate_all(&self.specs)?;

        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        ::log::info!(
            "Starting verification of {} root page(s) via {}",
            self.specs.len(),
            config.webdriver_url
        );

        let session = WebSession::connect(&config).await?;
        let outcome = verify_all(&session, &self.specs).await;
        session.close().await;

        match &outcome {
            Ok(report) => ::log::info!(
                "Verification finished: {} page(s) visited, {} problem(s)",
                report.pages_visited(),
                report.error_count()
            ),
            Err(e) => ::log::error!("Verification aborted: {}", e),
        }
        outcome
    }
}

async fn verify_all(session: &WebSession, specs: &[PageSpec]) -> Result<RunReport, VerifyError> {
    let mut pages = Vec::with_capacity(specs.len());
    for spec in specs {
        pages.push(verifier::verify_root(session, spec).await?);
    }
    Ok(RunReport { pages })
}
