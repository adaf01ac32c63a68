use serde::{Deserialize, Serialize};

/// Verification outcome for one page of the expected tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Name of the page (if the spec carried one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL this page was verified against
    pub url: String,

    /// Labels of child specs whose link was not found on this page
    pub unresolved_children: Vec<String>,

    /// Keyword patterns that did not match this page's text
    pub missing_keywords: Vec<String>,

    /// Results for the children that were resolved and verified
    pub children: Vec<PageResult>,
}

impl PageResult {
    /// True if this page itself failed verification
    pub fn has_errors(&self) -> bool {
        !self.unresolved_children.is_empty() || !self.missing_keywords.is_empty()
    }

    /// True if this page or any page below it failed verification
    pub fn subtree_has_errors(&self) -> bool {
        self.has_errors() || self.children.iter().any(PageResult::subtree_has_errors)
    }

    /// Preorder walk over this result and all descendants
    pub fn walk(&self) -> Vec<&PageResult> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.walk());
        }
        nodes
    }

    /// Display label for reporting
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// Outcome of a whole verification run, one entry per root spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub pages: Vec<PageResult>,
}

impl RunReport {
    /// True if no page anywhere in the run failed verification
    pub fn passed(&self) -> bool {
        !self.pages.iter().any(PageResult::subtree_has_errors)
    }

    /// Preorder walk over every result in the run
    pub fn walk(&self) -> Vec<&PageResult> {
        self.pages.iter().flat_map(PageResult::walk).collect()
    }

    /// Number of pages visited during the run
    pub fn pages_visited(&self) -> usize {
        self.walk().len()
    }

    /// Total unresolved links and missing keywords across the run
    pub fn error_count(&self) -> usize {
        self.walk()
            .iter()
            .map(|page| page.unresolved_children.len() + page.missing_keywords.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, children: Vec<PageResult>) -> PageResult {
        PageResult {
            name: None,
            url: url.to_string(),
            unresolved_children: Vec::new(),
            missing_keywords: Vec::new(),
            children,
        }
    }

    #[test]
    fn test_clean_page_has_no_errors() {
        let result = page("https://example.test/", vec![]);
        assert!(!result.has_errors());
        assert!(!result.subtree_has_errors());
    }

    #[test]
    fn test_missing_keyword_is_an_error() {
        let mut result = page("https://example.test/", vec![]);
        result.missing_keywords.push("Contact".to_string());
        assert!(result.has_errors());
    }

    #[test]
    fn test_unresolved_child_is_an_error() {
        let mut result = page("https://example.test/", vec![]);
        result.unresolved_children.push("About".to_string());
        assert!(result.has_errors());
    }

    #[test]
    fn test_deep_error_surfaces_in_subtree_and_report() {
        let mut leaf = page("https://example.test/a/b", vec![]);
        leaf.missing_keywords.push("Team".to_string());
        let mid = page("https://example.test/a", vec![leaf]);
        let root = page("https://example.test/", vec![mid]);

        assert!(!root.has_errors());
        assert!(root.subtree_has_errors());

        let report = RunReport { pages: vec![root] };
        assert!(!report.passed());
        assert_eq!(report.pages_visited(), 3);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_walk_is_preorder() {
        let leaf_a = page("https://example.test/a/1", vec![]);
        let leaf_b = page("https://example.test/b", vec![]);
        let mid = page("https://example.test/a", vec![leaf_a]);
        let root = page("https://example.test/", vec![mid, leaf_b]);

        let urls: Vec<&str> = root.walk().iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.test/",
                "https://example.test/a",
                "https://example.test/a/1",
                "https://example.test/b",
            ]
        );
    }
}
