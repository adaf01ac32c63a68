use crate::session::{Browse, SessionError};
use regex::Regex;

/// Outcome of resolving a link pattern against the current document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The link was found; the href is as written in the document and may
    /// still be relative
    Resolved(String),
    /// No anchor matched, by exact text or by the fallback search
    NotFound,
}

/// Finds the navigable anchor for a page spec on the currently loaded
/// document.
///
/// The primary strategy is an exact link-text lookup of `exact`. Only when
/// that reports an explicit miss does the fallback run: every href-bearing
/// anchor is tested in document order, `pattern` searched against the
/// anchor's visible text and then its accessible name, first match wins.
/// Session errors from the primary lookup propagate without invoking the
/// fallback. Resolution never navigates or clicks.
pub async fn resolve<B: Browse>(
    session: &B,
    exact: &str,
    pattern: &Regex,
) -> Result<Resolution, SessionError> {
    if let Some(anchor) = session.link_by_exact_text(exact).await? {
        ::log::debug!("Resolved {:?} by exact link text -> {}", exact, anchor.href);
        return Ok(Resolution::Resolved(anchor.href));
    }

    ::log::debug!("Exact lookup missed for {:?}, scanning anchors", exact);
    for anchor in session.anchors().await? {
        if pattern.is_match(&anchor.text) {
            ::log::debug!(
                "Resolved {:?} by text match on {:?} -> {}",
                exact,
                anchor.text,
                anchor.href
            );
            return Ok(Resolution::Resolved(anchor.href));
        }
        if let Some(name) = &anchor.accessible_name {
            if pattern.is_match(name) {
                ::log::debug!(
                    "Resolved {:?} by accessible name {:?} -> {}",
                    exact,
                    name,
                    anchor.href
                );
                return Ok(Resolution::Resolved(anchor.href));
            }
        }
    }

    Ok(Resolution::NotFound)
}
