use crate::config::SessionConfig;
use crate::parsers::{self, Anchor};
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the browsing session.
///
/// All of these are fatal for a run: without a working session no further
/// verification is meaningful. Element-not-found is NOT an error here; the
/// lookup operations report it as an explicit `None`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No WebDriver server accepted a session
    #[error("failed to start a WebDriver session at {url} or any fallback")]
    Connect {
        url: String,
        #[source]
        source: NewSessionError,
    },

    /// Navigation to a URL failed (unreachable, transport loss)
    #[error("failed to load {url}: {source}")]
    Navigation { url: String, source: CmdError },

    /// Any other WebDriver command failure
    #[error("webdriver command failed: {0}")]
    Command(#[from] CmdError),
}

/// Capabilities the verifier needs from a browsing session.
///
/// Exactly one document is loaded at a time; `body_text`, `anchors` and
/// `link_by_exact_text` all read the document loaded by the last `goto`.
/// None of the lookups navigate or click.
#[allow(async_fn_in_trait)]
pub trait Browse {
    /// Load a document
    async fn goto(&self, url: &str) -> Result<(), SessionError>;

    /// Rendered text of the current document body
    async fn body_text(&self) -> Result<String, SessionError>;

    /// Look up a single anchor whose link text equals `label` exactly.
    ///
    /// Returns `Ok(None)` when no such anchor exists (or it carries no
    /// `href`); errors are reserved for session failures.
    async fn link_by_exact_text(&self, label: &str) -> Result<Option<Anchor>, SessionError>;

    /// Every href-bearing anchor in the current document, in document order
    async fn anchors(&self) -> Result<Vec<Anchor>, SessionError>;
}

/// A live WebDriver-backed browsing session
pub struct WebSession {
    client: Client,
}

impl WebSession {
    /// Connect to a WebDriver server.
    ///
    /// Tries the configured URL first, then a list of common alternatives,
    /// and applies the configured page-load timeout to the session so that
    /// a hanging page is bounded by the driver.
    pub async fn connect(config: &SessionConfig) -> Result<Self, SessionError> {
        let client = connect_to_webdriver(&config.webdriver_url).await?;

        let timeouts = TimeoutConfiguration::new(
            None,
            Some(Duration::from_secs(config.page_load_timeout_secs)),
            None,
        );
        client.update_timeouts(timeouts).await?;

        Ok(Self { client })
    }

    /// Close the underlying WebDriver session.
    ///
    /// Failures are logged rather than returned; at this point the run's
    /// outcome is already decided.
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
    }
}

impl Browse for WebSession {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.client
            .goto(url)
            .await
            .map_err(|source| SessionError::Navigation {
                url: url.to_string(),
                source,
            })
    }

    async fn body_text(&self) -> Result<String, SessionError> {
        let html = self.client.source().await?;
        Ok(parsers::html::extract_text(&html))
    }

    async fn link_by_exact_text(&self, label: &str) -> Result<Option<Anchor>, SessionError> {
        let element = match self.client.find(Locator::LinkText(label)).await {
            Ok(element) => element,
            Err(e) if e.is_no_such_element() => {
                ::log::debug!("No anchor with exact link text {:?}", label);
                return Ok(None);
            }
            Err(e) => return Err(SessionError::Command(e)),
        };

        let Some(href) = element.attr("href").await? else {
            // The child URL can only be discovered from href
            ::log::debug!("Anchor {:?} has no href, treating as a miss", label);
            return Ok(None);
        };

        let text = element.text().await?;
        let accessible_name = match element.attr("aria-label").await? {
            Some(name) => Some(name),
            None => element.attr("title").await?,
        };

        Ok(Some(Anchor {
            text: text.split_whitespace().collect::<Vec<_>>().join(" "),
            accessible_name,
            href,
        }))
    }

    async fn anchors(&self) -> Result<Vec<Anchor>, SessionError> {
        let html = self.client.source().await?;
        Ok(parsers::html::extract_anchors(&html))
    }
}

/// Connects to the WebDriver instance, trying common fallback URLs if the
/// configured one does not answer
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, SessionError> {
    let first_attempt = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4723", // Appium default
        "http://localhost:9222", // Chrome debug port default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!("Failed to connect to any WebDriver server");
    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(SessionError::Connect {
        url: webdriver_url.to_string(),
        source: first_attempt,
    })
}
