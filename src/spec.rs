use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// One node of the expected site tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    /// Human-readable identifier, used for naming and reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Absolute URL; present on root nodes, absent on children whose URL
    /// is discovered by following a link from the parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Pattern locating the link to this page on the parent page: tried as
    /// an exact link label first, then as a regex against link text and
    /// accessible name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,

    /// Regexes that must each match somewhere in the page's rendered text
    #[serde(default)]
    pub keyword_patterns: Vec<String>,

    /// Child pages, resolved independently from this page
    #[serde(default)]
    pub children: Vec<PageSpec>,
}

/// Errors detected while loading or validating a spec tree, before any
/// navigation happens
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read spec file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed spec file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("root page {0:?} has no url")]
    MissingRootUrl(String),

    #[error("page {0:?} is not a root and has no link_text")]
    MissingLinkText(String),

    #[error("invalid pattern {pattern:?} on page {page:?}: {source}")]
    BadPattern {
        page: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl PageSpec {
    /// Best available identifier for diagnostics and reporting
    pub fn label(&self) -> &str {
        if let Some(name) = &self.name {
            name
        } else if let Some(link_text) = &self.link_text {
            link_text
        } else if let Some(url) = &self.url {
            url
        } else {
            "<unnamed page>"
        }
    }

    /// Validate this node as a root and its whole subtree.
    ///
    /// Checks the shape invariants (roots carry `url`, non-roots carry
    /// `link_text`) and compiles every pattern so that bad regexes surface
    /// here rather than mid-traversal.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.url.is_none() {
            return Err(SpecError::MissingRootUrl(self.label().to_string()));
        }
        self.validate_node(true)
    }

    fn validate_node(&self, is_root: bool) -> Result<(), SpecError> {
        if !is_root && self.link_text.is_none() {
            return Err(SpecError::MissingLinkText(self.label().to_string()));
        }

        if let Some(pattern) = &self.link_text {
            self.check_pattern(pattern)?;
        }
        for pattern in &self.keyword_patterns {
            self.check_pattern(pattern)?;
        }

        for child in &self.children {
            child.validate_node(false)?;
        }
        Ok(())
    }

    fn check_pattern(&self, pattern: &str) -> Result<(), SpecError> {
        Regex::new(pattern)
            .map(|_| ())
            .map_err(|source| SpecError::BadPattern {
                page: self.label().to_string(),
                pattern: pattern.to_string(),
                source,
            })
    }
}

/// Load a sequence of root specs from a JSON file
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<PageSpec>, SpecError> {
    let path_display = path.as_ref().display().to_string();

    let mut file = File::open(&path).map_err(|source| SpecError::Io {
        path: path_display.clone(),
        source,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| SpecError::Io {
            path: path_display.clone(),
            source,
        })?;

    let specs: Vec<PageSpec> =
        serde_json::from_str(&contents).map_err(|source| SpecError::Parse {
            path: path_display,
            source,
        })?;

    validate_all(&specs)?;
    Ok(specs)
}

/// Validate every root spec in a loaded sequence
pub fn validate_all(specs: &[PageSpec]) -> Result<(), SpecError> {
    for spec in specs {
        spec.validate()?;
    }
    Ok(())
}
