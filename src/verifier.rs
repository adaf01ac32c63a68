use crate::keywords::KeywordSet;
use crate::resolver::{self, Resolution};
use crate::results::PageResult;
use crate::session::{Browse, SessionError};
use crate::spec::{PageSpec, SpecError};
use regex::Regex;
use thiserror::Error;
use url::Url;

/// Errors that abort a verification run.
///
/// Per-page problems (an unresolved link, a missing keyword) are never
/// errors; they are recorded on the `PageResult` and traversal continues.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("cannot resolve href {href:?} against {base:?}: {source}")]
    Url {
        base: String,
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// Verifies a root spec and its entire subtree against the live site.
///
/// The spec tree should have passed `spec::validate_all` first; shape
/// problems that surface here are still reported as `SpecError`.
pub async fn verify_root<B: Browse>(
    session: &B,
    spec: &PageSpec,
) -> Result<PageResult, VerifyError> {
    let url = spec
        .url
        .as_deref()
        .ok_or_else(|| SpecError::MissingRootUrl(spec.label().to_string()))?;
    verify_page(session, spec, url).await
}

/// Verifies one page and recurses into its children.
///
/// Every child link is resolved against this page's document before any
/// descent, so a single load of the page is enough; navigation for the
/// children happens afterwards, driven purely by the discovered URLs.
async fn verify_page<B: Browse>(
    session: &B,
    spec: &PageSpec,
    url: &str,
) -> Result<PageResult, VerifyError> {
    ::log::info!("Verifying {} ({})", spec.label(), url);
    session.goto(url).await?;
    let text = session.body_text().await?;

    let keywords = compile_keywords(spec)?;
    let missing_keywords = keywords.missing_from(&text);
    for pattern in &missing_keywords {
        ::log::warn!("Keyword {:?} not found on {}", pattern, url);
    }

    let mut unresolved_children = Vec::new();
    let mut discovered = Vec::new();
    for child in &spec.children {
        if let Some(known) = &child.url {
            // Tolerated, not expected: a child declaring its own URL is
            // navigated to directly, without link resolution
            discovered.push((child, known.clone()));
            continue;
        }

        let raw = child
            .link_text
            .as_ref()
            .ok_or_else(|| SpecError::MissingLinkText(child.label().to_string()))?;
        let pattern = compile_pattern(child, raw)?;

        match resolver::resolve(session, raw, &pattern).await? {
            Resolution::Resolved(href) => {
                let child_url = absolutize(url, &href)?;
                discovered.push((child, child_url));
            }
            Resolution::NotFound => {
                ::log::warn!("Link {:?} not found on {}", child.label(), url);
                unresolved_children.push(child.label().to_string());
            }
        }
    }

    let mut children = Vec::with_capacity(discovered.len());
    for (child, child_url) in discovered {
        let result = Box::pin(verify_page(session, child, &child_url)).await?;
        children.push(result);
    }

    Ok(PageResult {
        name: spec.name.clone(),
        url: url.to_string(),
        unresolved_children,
        missing_keywords,
        children,
    })
}

fn compile_keywords(spec: &PageSpec) -> Result<KeywordSet, SpecError> {
    KeywordSet::new(&spec.keyword_patterns).map_err(|source| {
        let pattern = spec
            .keyword_patterns
            .iter()
            .find(|p| Regex::new(p).is_err())
            .cloned()
            .unwrap_or_default();
        SpecError::BadPattern {
            page: spec.label().to_string(),
            pattern,
            source,
        }
    })
}

fn compile_pattern(spec: &PageSpec, raw: &str) -> Result<Regex, SpecError> {
    Regex::new(raw).map_err(|source| SpecError::BadPattern {
        page: spec.label().to_string(),
        pattern: raw.to_string(),
        source,
    })
}

fn absolutize(base: &str, href: &str) -> Result<String, VerifyError> {
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .map_err(|source| VerifyError::Url {
            base: base.to_string(),
            href: href.to_string(),
            source,
        })
}
