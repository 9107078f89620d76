//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Placeholder for the encoded search term in a search URL template
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Encode a single query-string component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build a search URL for `term`
///
/// Returns `None` for a blank term. A template without `{query}` gets the
/// encoded term appended.
///
/// # Examples
/// ```ignore
/// search_url("https://www.bing.com/search?q={query}", " rust lang ")
/// // -> Some("https://www.bing.com/search?q=rust%20lang")
/// ```
pub fn search_url(template: &str, term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let encoded = encode_component(term);
    if template.contains(QUERY_PLACEHOLDER) {
        Some(template.replace(QUERY_PLACEHOLDER, &encoded))
    } else {
        Some(format!("{}{}", template, encoded))
    }
}

/// Open a URL in the default browser
pub fn open_browser(url: &str) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", "", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BING: &str = "https://www.bing.com/search?q={query}";

    #[test]
    fn test_search_url() {
        assert_eq!(
            search_url(BING, "  rust lang  ").as_deref(),
            Some("https://www.bing.com/search?q=rust%20lang")
        );
    }

    #[test]
    fn test_search_url_blank_term() {
        assert_eq!(search_url(BING, ""), None);
        assert_eq!(search_url(BING, " \t "), None);
    }

    #[test]
    fn test_encode_component_matches_js() {
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("(hi)!*'~._-"), "(hi)!*'~._-");
        assert_eq!(encode_component("新标签"), "%E6%96%B0%E6%A0%87%E7%AD%BE");
        assert_eq!(encode_component("c++ /x?"), "c%2B%2B%20%2Fx%3F");
    }

    #[test]
    fn test_template_without_placeholder() {
        assert_eq!(
            search_url("https://duckduckgo.com/?q=", "tokio").as_deref(),
            Some("https://duckduckgo.com/?q=tokio")
        );
    }
}
