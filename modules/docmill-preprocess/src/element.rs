use serde::Serialize;

/// One node of a converted document. Converters produce this shape so the
/// flattening below never touches converter-library types directly.
#[derive(Debug, Clone, Default)]
pub struct DocElement {
    pub label: Option<String>,
    pub text: Option<String>,
    pub children: Vec<DocElement>,
}

impl DocElement {
    pub fn leaf(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<DocElement>) -> Self {
        Self {
            label: Some(label.into()),
            text: None,
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRecord {
    pub label: String,
    pub text: String,
}

/// Flatten an element tree into its text-bearing nodes, pre-order.
///
/// A node contributes a record iff its text is present and non-empty; the
/// label falls back to "text" when absent. Children follow their parent in
/// original order, so the output length equals the number of text-bearing
/// nodes.
pub fn flatten_texts(elements: &[DocElement]) -> Vec<TextRecord> {
    let mut records = Vec::new();
    for elem in elements {
        collect(elem, &mut records);
    }
    records
}

fn collect(elem: &DocElement, out: &mut Vec<TextRecord>) {
    if let Some(text) = elem.text.as_deref() {
        if !text.is_empty() {
            out.push(TextRecord {
                label: elem.label.clone().unwrap_or_else(|| "text".to_string()),
                text: text.to_string(),
            });
        }
    }
    for child in &elem.children {
        collect(child, out);
    }
}
