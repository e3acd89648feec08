//! HTML to plain text conversion for plant profile pages.
//!
//! Profile pages carry their attributes as labeled lines ("Height:",
//! "Bloom Color:", ...) inside markup. Conversion walks the DOM, drops
//! script and style subtrees, and inserts a line break after each block
//! element so the labeled lines survive for attribute extraction.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Convert an HTML document to normalized plain text.
///
/// Lines are whitespace-collapsed and empty lines are dropped.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.tree.root(), &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    if let Node::Text(text) = node.value() {
        out.push_str(&text.text);
        return;
    }

    if let Node::Element(element) = node.value() {
        let name = element.name();
        if name == "script" || name == "style" {
            return;
        }
        for child in node.children() {
            collect_text(child, out);
        }
        if is_block(name) {
            out.push('\n');
        }
        return;
    }

    for child in node.children() {
        collect_text(child, out);
    }
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "br"
            | "li"
            | "tr"
            | "table"
            | "ul"
            | "ol"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_elements_become_lines() {
        let html = "<html><body><p>Height: 2-3 ft.</p><p>Bloom Color: Orange</p></body></html>";
        assert_eq!(html_to_text(html), "Height: 2-3 ft.\nBloom Color: Orange");
    }

    #[test]
    fn test_drops_script_and_style() {
        let html = "<body><style>p { color: red; }</style><p>Visible</p>\
                    <script>var x = 1;</script></body>";
        assert_eq!(html_to_text(html), "Visible");
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "<p>  Height:   2   ft.  </p>";
        assert_eq!(html_to_text(html), "Height: 2 ft.");
    }

    #[test]
    fn test_inline_tags_keep_line_together() {
        let html = "<p>Grows <b>2-3 ft.</b> tall</p>";
        assert_eq!(html_to_text(html), "Grows 2-3 ft. tall");
    }

    #[test]
    fn test_list_items_on_separate_lines() {
        let html = "<ul><li>Dry</li><li>Moist</li></ul>";
        assert_eq!(html_to_text(html), "Dry\nMoist");
    }

    #[test]
    fn test_labeled_lines_survive_for_extraction() {
        use crate::extract::PlantExtractor;

        let html = r#"<div class="plant">
            <p><strong>Height:</strong> 1-2 ft.</p>
            <p><strong>Bloom Color:</strong> Pink</p>
        </div>"#;
        let text = html_to_text(html);
        let fields = PlantExtractor::new().extract_fields(&text);

        let height = fields.height.unwrap();
        assert_eq!(height.min, 12.0);
        assert_eq!(height.max, 24.0);
        assert_eq!(fields.bloom_color, Some(vec!["Pink".to_string()]));
    }
}
