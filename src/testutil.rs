//! In-memory fixture site implementing `Browse`, so resolver and verifier
//! tests exercise the full traversal without a WebDriver server.

use crate::parsers::{self, Anchor};
use crate::session::{Browse, SessionError};
use fantoccini::error::CmdError;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct FakeSite {
    pages: HashMap<String, String>,
    current: Mutex<Option<String>>,
    anchor_scans: Mutex<usize>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current: Mutex::new(None),
            anchor_scans: Mutex::new(0),
        }
    }

    /// Register a page under an absolute URL
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// How many times the fallback anchor enumeration ran
    pub fn anchor_scans(&self) -> usize {
        *self.anchor_scans.lock().unwrap()
    }

    fn current_html(&self) -> Result<String, SessionError> {
        let current = self.current.lock().unwrap();
        let url = current.as_ref().ok_or_else(|| {
            SessionError::Command(CmdError::NotJson("no document loaded".to_string()))
        })?;
        Ok(self.pages[url].clone())
    }
}

impl Browse for FakeSite {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        if !self.pages.contains_key(url) {
            return Err(SessionError::Navigation {
                url: url.to_string(),
                source: CmdError::NotJson("no such page in fixture site".to_string()),
            });
        }
        *self.current.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn body_text(&self) -> Result<String, SessionError> {
        Ok(parsers::html::extract_text(&self.current_html()?))
    }

    async fn link_by_exact_text(&self, label: &str) -> Result<Option<Anchor>, SessionError> {
        let anchors = parsers::html::extract_anchors(&self.current_html()?);
        Ok(anchors.into_iter().find(|a| a.text == label))
    }

    async fn anchors(&self) -> Result<Vec<Anchor>, SessionError> {
        *self.anchor_scans.lock().unwrap() += 1;
        Ok(parsers::html::extract_anchors(&self.current_html()?))
    }
}
