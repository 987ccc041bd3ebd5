use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// A selection at least this long wins over page-content heuristics.
pub const SHORT_SELECTION_CHARS: usize = 200;

/// Candidates tried in order when the selection is absent or short.
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role=main]",
    "#content",
    ".content",
    ".post",
    ".entry-content",
];

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Picks the text a producer window would send for `html`.
///
/// A selection of [`SHORT_SELECTION_CHARS`] or more is used as is. Otherwise
/// the first non-empty [`CONTENT_SELECTORS`] match is used, then the body
/// text. A short selection is the last resort.
pub fn extract_page_text(html: &str, selection: Option<&str>) -> String {
    let selection = selection.map(str::trim).unwrap_or_default();
    if selection.chars().count() >= SHORT_SELECTION_CHARS {
        return selection.to_string();
    }

    let document = Html::parse_document(html);
    let from_page = CONTENT_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty())
        })
        .or_else(|| {
            Selector::parse("body")
                .ok()
                .and_then(|body| document.select(&body).next().map(element_text))
                .filter(|text| !text.is_empty())
        });

    from_page.unwrap_or_else(|| selection.to_string())
}

/// Visible text of `element`, one line per text run, scripts and styles skipped.
fn element_text(element: ElementRef<'_>) -> String {
    let mut lines = Vec::new();
    for child in element.children() {
        collect_text(child, &mut lines);
    }
    lines.join("\n")
}

fn collect_text(node: NodeRef<'_, Node>, lines: &mut Vec<String>) {
    match node.value() {
        Node::Text(text) => {
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !collapsed.is_empty() {
                lines.push(collapsed);
            }
        }
        Node::Element(element) if SKIPPED_ELEMENTS.contains(&element.name()) => {}
        Node::Element(_) => {
            for child in node.children() {
                collect_text(child, lines);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
    <html><head><title>T</title><style>p { color: red }</style></head>
    <body>
        <nav>Home About</nav>
        <main>
            <article><h1>Heading</h1><p>First   paragraph.</p><script>track()</script></article>
        </main>
        <footer>Footer</footer>
    </body></html>
    "#;

    #[test]
    fn long_selection_wins() {
        let selection = "s".repeat(SHORT_SELECTION_CHARS);
        assert_eq!(extract_page_text(PAGE, Some(&selection)), selection);
    }

    #[test]
    fn short_selection_defers_to_article() {
        assert_eq!(
            extract_page_text(PAGE, Some("just a bit")),
            "Heading\nFirst paragraph."
        );
    }

    #[test]
    fn falls_through_to_containers_then_body() {
        let main_only = "<body><main><p>In main</p></main><p>outside</p></body>";
        assert_eq!(extract_page_text(main_only, None), "In main");

        let content_div = "<body><div id=\"content\">Story</div><aside>ad</aside></body>";
        assert_eq!(extract_page_text(content_div, None), "Story");

        let bare = "<body><p>One</p><p>Two</p><script>x()</script></body>";
        assert_eq!(extract_page_text(bare, None), "One\nTwo");
    }

    #[test]
    fn empty_article_is_skipped() {
        let html = "<body><article> </article><div class=\"post\">Post body</div></body>";
        assert_eq!(extract_page_text(html, None), "Post body");
    }

    #[test]
    fn short_selection_is_last_resort() {
        assert_eq!(extract_page_text("<body></body>", Some(" picked ")), "picked");
        assert_eq!(extract_page_text("", None), "");
    }
}
