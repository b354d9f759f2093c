// DOM-based href lookup using scraper (html5ever underneath)

use scraper::{Html, Selector};

pub(super) fn hrefs(html: &str) -> Vec<String> {
    // "a[href]" means "all <a> tags that have an href attribute"
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
