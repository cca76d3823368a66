use crate::config::PreviewOptions;
use crate::document::{Node, RichText, TextLeaf};
use crate::error::DocumentError;

/// The canonical empty document: one paragraph holding one empty leaf.
pub fn empty() -> RichText {
    vec![Node::paragraph("")]
}

pub fn from_string(s: impl Into<String>) -> RichText {
    vec![Node::paragraph(s)]
}

/// Text of the leaf reached by always descending into the first child,
/// starting at the first top-level node.
pub fn first_leaf_text(doc: &[Node]) -> Result<&str, DocumentError> {
    let mut node = doc
        .first()
        .ok_or(DocumentError::invalid("document has no nodes"))?;

    loop {
        match node {
            Node::Text(leaf) => return Ok(&leaf.text),
            Node::Element(element) => {
                node = element
                    .children
                    .first()
                    .ok_or(DocumentError::invalid("element has no children"))?;
            }
        }
    }
}

/// Depth-first iterator over the text leaves below `node`, in document order.
pub fn texts(node: &Node) -> Texts<'_> {
    Texts {
        stack: vec![std::slice::from_ref(node).iter()],
    }
}

pub struct Texts<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Texts<'a> {
    type Item = &'a TextLeaf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(Node::Text(leaf)) => return Some(leaf),
                Some(Node::Element(element)) => self.stack.push(element.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Plain-text preview of a document: the first three text runs of the first
/// top-level node, one per line.
///
/// Returns `None` when there is nothing to show: no nodes at all, or a first
/// node without any text (which covers the canonical empty document).
pub fn preview(doc: &[Node]) -> Option<String> {
    preview_with(doc, &PreviewOptions::default())
}

pub fn preview_with(doc: &[Node], options: &PreviewOptions) -> Option<String> {
    let first = doc.first()?;
    let options = options.with_defaults();

    let lines: Vec<&str> = texts(first)
        .take(options.max_lines)
        .map(|leaf| leaf.text.as_str())
        .collect();
    if lines.iter().all(|line| line.is_empty()) {
        return None;
    }
    Some(lines.join("\n"))
}

/// Concatenated text of every top-level node, one node per line.
pub fn plain_text(doc: &[Node]) -> String {
    let mut out = String::new();
    for (ix, node) in doc.iter().enumerate() {
        if ix > 0 {
            out.push('\n');
        }
        for leaf in texts(node) {
            out.push_str(&leaf.text);
        }
    }
    out
}
