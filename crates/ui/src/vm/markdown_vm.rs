use std::collections::{HashMap, HashSet};

/// Render assistant markdown to HTML that is safe to inject into the page.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "br", "em", "strong", "b", "i", "del", "code", "pre", "blockquote", "ul", "ol", "li",
        "a", "h1", "h2", "h3", "h4", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_emphasis_and_lists() {
        let html = markdown_to_html("**Mitochondria** are:\n\n- organelles\n- energy makers\n");
        assert!(html.contains("<strong>Mitochondria</strong>"));
        assert!(html.contains("<li>organelles</li>"));
    }

    #[test]
    fn strips_scripts_and_event_handlers() {
        let html = markdown_to_html("hi <script>alert(1)</script><img src=x onerror=alert(1)>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("onerror"));
        assert!(!html.contains("<img"));
        assert!(html.contains("hi"));
    }

    #[test]
    fn links_keep_href_only() {
        let html = sanitize_html(r#"<a href="https://example.org" onclick="x()">x</a>"#);
        assert!(html.contains(r#"href="https://example.org""#));
        assert!(!html.contains("onclick"));
    }
}
