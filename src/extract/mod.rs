// src/extract/mod.rs
// =============================================================================
// This module turns a fetched page into the set of links the crawler follows.
//
// Two ways of finding href values:
// - pattern: a regex scan for href="..." / href='...' over the raw text.
//   Cheap and tolerant, but it also matches hrefs inside scripts and
//   comments. This is the default.
// - dom: <a href> elements from a parsed HTML document.
//
// Every href then goes through the same steps:
// 1. Resolve it against the page URL
// 2. Drop the #fragment
// 3. Keep it only if it has the same origin (scheme, host, port) as the page
// 4. Deduplicate
// =============================================================================

mod dom;
mod pattern;

use std::collections::BTreeSet;

use url::Url;

use crate::config::ExtractorKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkExtractor {
    kind: ExtractorKind,
}

impl LinkExtractor {
    pub fn new(kind: ExtractorKind) -> Self {
        Self { kind }
    }

    /// Same-origin links on the page, fragment-free and deduplicated.
    pub fn extract(&self, base: &Url, html: &str) -> BTreeSet<Url> {
        self.extract_all(base, html)
            .into_iter()
            .filter(|link| is_same_origin(base, link))
            .collect()
    }

    /// Every http(s) link on the page regardless of origin.
    pub fn extract_all(&self, base: &Url, html: &str) -> BTreeSet<Url> {
        if html.is_empty() {
            return BTreeSet::new();
        }

        let hrefs = match self.kind {
            ExtractorKind::Pattern => pattern::hrefs(html),
            ExtractorKind::Dom => dom::hrefs(html),
        };

        let links: BTreeSet<Url> = hrefs
            .iter()
            .filter_map(|href| resolve(base, href))
            .filter(|link| matches!(link.scheme(), "http" | "https"))
            .collect();

        tracing::debug!("Extracted {} link(s) from {}", links.len(), base);
        links
    }
}

// Resolves a possibly-relative href against the page URL and strips the
// fragment. Returns None when the href cannot be joined.
pub(crate) fn resolve(base: &Url, href: &str) -> Option<Url> {
    match base.join(href) {
        Ok(mut url) => {
            url.set_fragment(None);
            Some(url)
        }
        Err(e) => {
            tracing::debug!("Dropping href '{}' on {}: {}", href, base, e);
            None
        }
    }
}

/// Scheme, host and port must all match; subdomains are different origins.
pub fn is_same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn urls(links: &BTreeSet<Url>) -> Vec<&str> {
        links.iter().map(Url::as_str).collect()
    }

    #[rstest]
    #[case(ExtractorKind::Pattern)]
    #[case(ExtractorKind::Dom)]
    fn test_same_origin_only(#[case] kind: ExtractorKind) {
        let html = r#"
            <a href="/b">B</a>
            <a href="http://other.test/c">Other</a>
            <a href="http://sub.a.test/d">Subdomain</a>
            <a href="https://a.test/e">Other scheme</a>
            <a href="http://a.test:8080/f">Other port</a>
        "#;
        let base = Url::parse("http://a.test/").unwrap();
        let links = LinkExtractor::new(kind).extract(&base, html);

        assert_eq!(urls(&links), vec!["http://a.test/b"]);
    }

    #[rstest]
    #[case(ExtractorKind::Pattern)]
    #[case(ExtractorKind::Dom)]
    fn test_fragments_are_stripped_and_deduplicated(#[case] kind: ExtractorKind) {
        let html = r##"
            <a href="/page#top">Top</a>
            <a href="/page#bottom">Bottom</a>
            <a href="/page">Page</a>
            <a href="#section">Self</a>
        "##;
        let base = Url::parse("http://a.test/dir/current").unwrap();
        let links = LinkExtractor::new(kind).extract(&base, html);

        assert_eq!(
            urls(&links),
            vec!["http://a.test/dir/current", "http://a.test/page"]
        );
    }

    #[test]
    fn test_relative_links_resolve_against_page() {
        let html = r#"<a href="child">c</a> <a href="../up">u</a> <a href="?q=1">q</a>"#;
        let base = Url::parse("http://a.test/one/two/page.html").unwrap();
        let links = LinkExtractor::default().extract(&base, html);

        assert_eq!(
            urls(&links),
            vec![
                "http://a.test/one/two/child",
                "http://a.test/one/two/page.html?q=1",
                "http://a.test/one/up",
            ]
        );
    }

    #[test]
    fn test_non_http_schemes_are_dropped() {
        let html = r#"
            <a href="mailto:me@a.test">mail</a>
            <a href="javascript:void(0)">js</a>
            <a href="tel:+123">phone</a>
        "#;
        let base = Url::parse("http://a.test/").unwrap();
        let extractor = LinkExtractor::default();

        assert!(extractor.extract(&base, html).is_empty());
        assert!(extractor.extract_all(&base, html).is_empty());
    }

    #[test]
    fn test_extract_all_keeps_other_origins() {
        let html = r#"<a href="/b">b</a><a href="http://other.test/c#x">c</a>"#;
        let base = Url::parse("http://a.test/").unwrap();
        let links = LinkExtractor::default().extract_all(&base, html);

        assert_eq!(urls(&links), vec!["http://a.test/b", "http://other.test/c"]);
    }

    #[test]
    fn test_unjoinable_href_is_dropped() {
        let html = r#"<a href="http://[::1]:namedport">bad</a><a href="/ok">ok</a>"#;
        let base = Url::parse("http://a.test/").unwrap();
        let links = LinkExtractor::default().extract(&base, html);

        assert_eq!(urls(&links), vec!["http://a.test/ok"]);
    }

    #[test]
    fn test_empty_page_has_no_links() {
        let base = Url::parse("http://a.test/").unwrap();
        assert!(LinkExtractor::default().extract(&base, "").is_empty());
    }
}
