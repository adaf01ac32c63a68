pub mod html;

/// A navigable link extracted from the loaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Visible text of the anchor, whitespace-normalized
    pub text: String,

    /// Assistive-technology label, read from `aria-label` with `title`
    /// as a fallback
    pub accessible_name: Option<String>,

    /// Navigation target, possibly relative to the document URL
    pub href: String,
}
