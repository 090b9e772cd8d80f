//! Flatten listing pages into the trimmed, non-empty line stream the
//! listing parser consumes.

use scraper::Html;

/// Elements whose text never reaches the rendered page.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Split raw text into trimmed, non-empty lines.
#[must_use]
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Extract the visible text of an HTML document, one line per text-node
/// line, in document order.
#[must_use]
pub fn lines_from_html(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }
        lines.extend(lines_from_text(text));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lines_are_trimmed_and_compacted() {
        let lines = lines_from_text("  Clerk \n\n\tClerk\n   \nPost Office\r\n");
        assert_eq!(lines, ["Clerk", "Clerk", "Post Office"]);
    }

    #[test]
    fn html_text_nodes_become_lines() {
        let html = r#"
            <html><head><title>Jobs</title><style>.x { color: red }</style></head>
            <body>
              <div class="card"><h3>Data Analyst</h3><h4>Data Analyst</h4>
                <p>Acme Corp</p><span>₹40,000 - ₹60,000</span>
                <span>B.Tech</span><span>Pune</span></div>
              <script>var salary = 99999;</script>
            </body></html>"#;
        let lines = lines_from_html(html);
        assert_eq!(
            lines,
            [
                "Jobs",
                "Data Analyst",
                "Data Analyst",
                "Acme Corp",
                "₹40,000 - ₹60,000",
                "B.Tech",
                "Pune",
            ]
        );
    }

    #[test]
    fn multi_line_text_node_is_split() {
        let lines = lines_from_html("<body><pre>one\n two \n\nthree</pre></body>");
        assert_eq!(lines, ["one", "two", "three"]);
    }
}
