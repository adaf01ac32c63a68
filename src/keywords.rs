use regex::Regex;

/// Tests whether a keyword pattern matches anywhere in the page text.
///
/// This is a regex search, not a full-string match.
pub fn keyword_found(pattern: &Regex, text: &str) -> bool {
    pattern.is_match(text)
}

/// A page's keyword patterns, compiled once for the node
#[derive(Debug)]
pub struct KeywordSet {
    patterns: Vec<(String, Regex)>,
}

impl KeywordSet {
    /// Compile a list of keyword patterns
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            compiled.push((pattern.clone(), Regex::new(pattern)?));
        }
        Ok(Self { patterns: compiled })
    }

    /// Number of patterns in the set
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if the set carries no patterns (navigation-only check)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the patterns that do not match the given text, in
    /// declaration order
    pub fn missing_from(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|(_, regex)| !keyword_found(regex, text))
            .map(|(pattern, _)| pattern.clone())
            .collect()
    }
}
