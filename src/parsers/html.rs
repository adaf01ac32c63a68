use crate::parsers::Anchor;
use scraper::{Html, Selector};

/// Extracts the rendered text of the document body
pub fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let content_selector = Selector::parse("body").unwrap();
    doc.select(&content_selector)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts every anchor that carries an `href`, in document order
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let doc = Html::parse_document(html);

    let link_selector = Selector::parse("a[href]").unwrap();
    let anchors: Vec<Anchor> = doc
        .select(&link_selector)
        .filter_map(|e| {
            let href = e.value().attr("href")?.to_string();
            let text = e
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            let accessible_name = e
                .value()
                .attr("aria-label")
                .or_else(|| e.value().attr("title"))
                .map(|s| s.to_string());
            Some(Anchor {
                text,
                accessible_name,
                href,
            })
        })
        .collect();

    ::log::debug!("Extracted {} anchors from document", anchors.len());
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_normalizes_whitespace() {
        let html = r#"<html><body>
            <h1>Hello</h1>
            <p>World   and
            more</p>
        </body></html>"#;
        assert_eq!(extract_text(html), "Hello World and more");
    }

    #[test]
    fn test_extract_text_of_empty_body() {
        assert_eq!(extract_text("<html><body></body></html>"), "");
    }

    #[test]
    fn test_extract_anchors_in_document_order() {
        let html = r#"<html><body>
            <a href="/first">First</a>
            <p><a href="/second">Second</a></p>
            <a href="/third">Third</a>
        </body></html>"#;
        let anchors = extract_anchors(html);
        let hrefs: Vec<&str> = anchors.iter().map(|a| a.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/first", "/second", "/third"]);
        assert_eq!(anchors[0].text, "First");
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<body><a name="top">Top</a><a href="/real">Real</a></body>"#;
        let anchors = extract_anchors(html);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].href, "/real");
    }

    #[test]
    fn test_accessible_name_prefers_aria_label() {
        let html = r#"<body>
            <a href="/a" aria-label="Open the docs" title="ignored">icon</a>
            <a href="/b" title="From title">icon</a>
            <a href="/c">Plain</a>
        </body>"#;
        let anchors = extract_anchors(html);
        assert_eq!(anchors[0].accessible_name.as_deref(), Some("Open the docs"));
        assert_eq!(anchors[1].accessible_name.as_deref(), Some("From title"));
        assert_eq!(anchors[2].accessible_name, None);
    }

    #[test]
    fn test_anchor_text_spans_nested_elements() {
        let html = r#"<body><a href="/x"><span>kubectl</span> <b>cheat</b> command list</a></body>"#;
        let anchors = extract_anchors(html);
        assert_eq!(anchors[0].text, "kubectl cheat command list");
    }
}
