use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::element::DocElement;

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Tags whose subtrees carry no document text.
const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Build an element tree from an HTML document. Each element is labeled
/// with its tag name and carries its own (direct) text; nesting is
/// preserved, so headings, list items and table cells stay attached to
/// their containers.
pub fn html_elements(html: &str) -> Vec<DocElement> {
    let document = Html::parse_document(html);
    match document.select(&BODY).next() {
        Some(body) => body.child_elements().filter_map(element_node).collect(),
        None => document
            .root_element()
            .child_elements()
            .filter_map(element_node)
            .collect(),
    }
}

fn element_node(el: ElementRef) -> Option<DocElement> {
    let tag = el.value().name();
    if SKIPPED_TAGS.contains(&tag) {
        return None;
    }

    let children: Vec<DocElement> = el.child_elements().filter_map(element_node).collect();
    let text = own_text(el);
    if text.is_none() && children.is_empty() {
        return None;
    }

    Some(DocElement {
        label: Some(tag.to_string()),
        text,
        children,
    })
}

/// Direct text of an element (not descendants), whitespace-normalized.
fn own_text(el: ElementRef) -> Option<String> {
    let mut buf = String::new();
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            buf.push_str(&text.text);
            buf.push(' ');
        }
    }
    let joined = buf.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::flatten_texts;

    #[test]
    fn labels_follow_tag_names() {
        let elements = html_elements(
            "<html><body><h1>Heading</h1><p>Paragraph one.</p><p>Paragraph two.</p></body></html>",
        );
        let records = flatten_texts(&elements);
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["h1", "p", "p"]);
    }

    #[test]
    fn nesting_flattens_in_preorder() {
        let elements = html_elements(
            "<html><body><div>container<ul><li>one</li><li>two</li></ul></div></body></html>",
        );
        let records = flatten_texts(&elements);
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["container", "one", "two"]);
    }

    #[test]
    fn script_and_style_subtrees_are_skipped() {
        let elements = html_elements(
            "<html><head><title>t</title></head><body>\
             <script>var x = 1;</script><style>p { color: red }</style>\
             <p>kept</p></body></html>",
        );
        let records = flatten_texts(&elements);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "kept");
    }

    #[test]
    fn whitespace_is_normalized() {
        let elements = html_elements("<html><body><p>  spaced \n   out  </p></body></html>");
        let records = flatten_texts(&elements);
        assert_eq!(records[0].text, "spaced out");
    }

    #[test]
    fn empty_document_yields_no_elements() {
        assert!(html_elements("<html><body></body></html>").is_empty());
    }
}
