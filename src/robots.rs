// src/robots.rs
// =============================================================================
// robots.txt handling for the default ("*") user agent.
//
// robots.txt is fetched once per crawl from the seed's origin and parsed in
// a single pass:
// - "User-agent:" starts a block; the block applies only if the agent is *
// - inside an applying block, each non-empty "Disallow:" path is resolved
//   against the seed URL and stored as an absolute URL prefix
// - a blank line ends the current block
//
// Matching is a plain string prefix test on the full URL. Allow rules,
// wildcards and per-agent sections other than * are not interpreted.
// =============================================================================

use url::Url;

use crate::fetch::{FetchOutcome, Fetcher};

const USER_AGENT: &str = "user-agent:";
const DISALLOW: &str = "disallow:";

/// Disallowed URL prefixes for the wildcard agent, in file order.
///
/// An empty rule set allows everything; that is also what an absent or
/// unreachable robots.txt produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    disallows: Vec<String>,
}

impl RobotsRules {
    /// Fetches `/robots.txt` from the origin of `base` and parses it.
    /// Any failure yields an empty rule set.
    pub async fn load(fetcher: &Fetcher, base: &Url) -> Self {
        let robots_url = match base.join("/robots.txt") {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build robots.txt URL for {}: {}", base, e);
                return Self::default();
            }
        };

        tracing::info!("Fetching robots.txt from: {}", robots_url);

        match fetcher.fetch_text(&robots_url).await {
            FetchOutcome::Page(text) => {
                let rules = Self::parse(&text, base);
                tracing::debug!(
                    "robots.txt for {} has {} disallow rule(s)",
                    base,
                    rules.disallows.len()
                );
                rules
            }
            FetchOutcome::Failed(failure) => {
                tracing::warn!(
                    "No usable robots.txt at {} ({}), crawling without restrictions",
                    robots_url,
                    failure
                );
                Self::default()
            }
        }
    }

    pub fn parse(text: &str, base: &Url) -> Self {
        let mut disallows = Vec::new();
        let mut applies = false;

        // Bare CR line endings count as line breaks too
        let text = text.replace("\r\n", "\n");

        for raw in text.split(['\n', '\r']) {
            let raw = raw.trim();
            // Drop trailing "# ..." comments; a comment-only line is not a blank line
            let line = raw.split('#').next().unwrap_or("").trim();
            // ASCII lowercasing keeps byte offsets, so prefixes can be sliced off `line`
            let lower = line.to_ascii_lowercase();

            if lower.starts_with(USER_AGENT) {
                applies = line[USER_AGENT.len()..].trim() == "*";
            } else if applies && lower.starts_with(DISALLOW) {
                let path = line[DISALLOW.len()..].trim();
                if path.is_empty() {
                    continue;
                }
                match base.join(path) {
                    Ok(rule) => disallows.push(rule.to_string()),
                    Err(e) => tracing::debug!("Ignoring robots.txt rule '{}': {}", path, e),
                }
            } else if raw.is_empty() {
                applies = false;
            }
        }

        Self { disallows }
    }

    pub fn allows(&self, url: &str) -> bool {
        !self.disallows.iter().any(|rule| url.starts_with(rule.as_str()))
    }

    pub fn disallows(&self) -> &[String] {
        &self.disallows
    }

    pub fn is_empty(&self) -> bool {
        self.disallows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlConfig;
    use httpmock::{Method::GET, MockServer};
    use rstest::rstest;

    fn base() -> Url {
        Url::parse("http://a.test/").unwrap()
    }

    #[rstest]
    #[case("", vec![])]
    #[case("User-agent: *\nDisallow: /private", vec!["http://a.test/private"])]
    #[case("user-AGENT: *\nDISALLOW: /x\ndisallow:/y", vec!["http://a.test/x", "http://a.test/y"])]
    #[case("User-agent: *\nDisallow:", vec![])]
    #[case("User-agent: googlebot\nDisallow: /private", vec![])]
    #[case("User-agent: *\n\nDisallow: /after-blank", vec![])]
    #[case(
        "User-agent: *\nDisallow: /a\n\nUser-agent: bot\nDisallow: /b\n\nUser-agent: *\nDisallow: /c",
        vec!["http://a.test/a", "http://a.test/c"]
    )]
    #[case("User-agent: *\nUser-agent: bot\nDisallow: /shared", vec![])]
    #[case("User-agent: bot\nUser-agent: *\nDisallow: /shared", vec!["http://a.test/shared"])]
    #[case("  User-agent: *  \n  Disallow: /indented  ", vec!["http://a.test/indented"])]
    #[case("User-agent: *\n# comment\nAllow: /open\nDisallow: /closed", vec!["http://a.test/closed"])]
    #[case("User-agent: * # all crawlers\nDisallow: /private", vec!["http://a.test/private"])]
    #[case("User-agent: *  # x\nDisallow: /private # no bots", vec!["http://a.test/private"])]
    #[case("User-agent: *\rDisallow: /private\r", vec!["http://a.test/private"])]
    #[case("User-agent: *\r\nDisallow: /a\r\nDisallow: /b\r\n", vec!["http://a.test/a", "http://a.test/b"])]
    #[case("User-agent: *\r\rDisallow: /after-blank", vec![])]
    fn test_parse(#[case] text: &str, #[case] expected: Vec<&str>) {
        let rules = RobotsRules::parse(text, &base());
        assert_eq!(rules.disallows(), expected.as_slice());
    }

    #[test]
    fn test_commented_wildcard_agent_blocks_private_pages() {
        let rules = RobotsRules::parse("User-agent: * # all crawlers\nDisallow: /private", &base());
        assert!(!rules.allows("http://a.test/private/x"));
    }

    #[test]
    fn test_empty_rules_allow_everything() {
        let rules = RobotsRules::default();
        assert!(rules.is_empty());
        assert!(rules.allows("http://a.test/private/x"));
    }

    #[test]
    fn test_prefix_match_is_not_segment_aware() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow: /private", &base());

        assert!(!rules.allows("http://a.test/private"));
        assert!(!rules.allows("http://a.test/private/x"));
        assert!(!rules.allows("http://a.test/privateer"));
        assert!(rules.allows("http://a.test/public"));
        assert!(rules.allows("http://a.test/"));
    }

    #[tokio::test]
    async fn test_load_from_server() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/robots.txt");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("User-agent: *\nDisallow: /private/");
            })
            .await;

        let fetcher = Fetcher::new(&CrawlConfig::default()).unwrap();
        let seed = Url::parse(&server.url("/docs/index.html")).unwrap();
        let rules = RobotsRules::load(&fetcher, &seed).await;

        mock.assert_async().await;
        assert_eq!(rules.disallows(), [server.url("/private/")].as_slice());
        assert!(!rules.allows(&server.url("/private/page")));
        assert!(rules.allows(&server.url("/docs/index.html")));
    }

    #[tokio::test]
    async fn test_missing_robots_allows_everything() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/robots.txt");
                then.status(404);
            })
            .await;

        let fetcher = Fetcher::new(&CrawlConfig::default()).unwrap();
        let seed = Url::parse(&server.url("/")).unwrap();
        let rules = RobotsRules::load(&fetcher, &seed).await;

        assert!(rules.is_empty());
    }
}
