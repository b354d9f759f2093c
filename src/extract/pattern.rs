// Regex-based href scanner. Not an HTML parser: hrefs inside scripts or
// comments are picked up too, and unquoted attributes are missed.

use std::sync::LazyLock;

use regex::Regex;

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=["'](.*?)["']"#).expect("href pattern is valid"));

pub(super) fn hrefs(html: &str) -> Vec<String> {
    HREF.captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"<a href="/a">"#, vec!["/a"])]
    #[case("<a href='/single'>", vec!["/single"])]
    #[case(r#"<A HREF="/upper">"#, vec!["/upper"])]
    #[case(r#"<link href="/style.css"><a href="">"#, vec!["/style.css", ""])]
    #[case(r#"<script>var x = 'href="/in-script"';</script>"#, vec!["/in-script"])]
    #[case("<a href=/unquoted>", vec![])]
    #[case(r#"<a href = "/spaced">"#, vec![])]
    #[case("<p>no links</p>", vec![])]
    fn test_hrefs(#[case] html: &str, #[case] expected: Vec<&str>) {
        assert_eq!(hrefs(html), expected);
    }
}
