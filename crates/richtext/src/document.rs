use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;

pub type Attrs = BTreeMap<String, Value>;

/// An ordered sequence of top-level nodes, in reading order.
pub type RichText = Vec<Node>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(TextLeaf),
    Element(Element),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextLeaf::new(text))
    }

    pub fn element(kind: ElementKind, children: Vec<Node>) -> Self {
        Node::Element(Element::new(kind, children))
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::element(ElementKind::Paragraph, vec![Node::text(text)])
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextLeaf> {
        match self {
            Node::Text(leaf) => Some(leaf),
            Node::Element(_) => None,
        }
    }
}

/// A node is a leaf exactly when it has a string `text` field.
impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let attrs = Attrs::deserialize(deserializer)?;
        let node = if matches!(attrs.get(TEXT), Some(Value::String(_))) {
            TextLeaf::from_attrs(attrs).map(Node::Text)
        } else {
            Element::from_attrs(attrs).map(Node::Element)
        };
        node.map_err(de::Error::custom)
    }
}

impl From<TextLeaf> for Node {
    fn from(leaf: TextLeaf) -> Self {
        Node::Text(leaf)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Formatting flags of a text leaf. Flags are independent and may combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub code: bool,
}

impl Marks {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

const TEXT: &str = "text";
const TYPE: &str = "type";
const CHILDREN: &str = "children";

/// A leaf as stored. Marks hold only boolean values; anything else under a
/// mark key (`null`, numbers) stays in `attrs` and is written back as is.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TextLeaf {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,

    /// Leaf properties this model does not interpret. Written back unchanged.
    #[serde(flatten)]
    pub attrs: Attrs,
}

impl TextLeaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_marks(mut self, marks: Marks) -> Self {
        self.bold = marks.bold.then_some(true);
        self.italic = marks.italic.then_some(true);
        self.underline = marks.underline.then_some(true);
        self.code = marks.code.then_some(true);
        self
    }

    fn from_attrs(mut attrs: Attrs) -> Result<Self, DocumentError> {
        let text = take_string(&mut attrs, TEXT)
            .ok_or(DocumentError::invalid("text leaf without a string `text`"))?;
        Ok(Self {
            text,
            bold: take_bool(&mut attrs, "bold"),
            italic: take_bool(&mut attrs, "italic"),
            underline: take_bool(&mut attrs, "underline"),
            code: take_bool(&mut attrs, "code"),
            attrs,
        })
    }

    pub fn marks(&self) -> Marks {
        Marks {
            bold: self.bold.unwrap_or(false),
            italic: self.italic.unwrap_or(false),
            underline: self.underline.unwrap_or(false),
            code: self.code.unwrap_or(false),
        }
    }
}

/// Payload of an inline `mention` element.
///
/// All four fields are needed for a working link, but any of them may be
/// absent in stored documents. Rendering degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MentionData {
    pub author_id: Option<String>,
    pub author_username: Option<String>,
    pub post_id: Option<String>,
    pub value: Option<String>,
}

impl MentionData {
    pub fn is_complete(&self) -> bool {
        [
            &self.author_id,
            &self.author_username,
            &self.post_id,
            &self.value,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
    Section,
    SectionTitle,
    Mention(MentionData),
    /// Any tag this model does not know about, kept verbatim.
    Other(String),
    /// An element stored without a `type` field.
    Untyped,
}

impl ElementKind {
    /// Maps a wire tag to its kind. `mention` maps to an empty payload; use
    /// [`Element`] deserialization to pick up the mention attributes.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "paragraph" => ElementKind::Paragraph,
            "heading-1" => ElementKind::Heading1,
            "heading-2" => ElementKind::Heading2,
            "heading-3" => ElementKind::Heading3,
            "block-quote" => ElementKind::BlockQuote,
            "bulleted-list" => ElementKind::BulletedList,
            "numbered-list" => ElementKind::NumberedList,
            "list-item" => ElementKind::ListItem,
            "section" => ElementKind::Section,
            "section-title" => ElementKind::SectionTitle,
            "mention" => ElementKind::Mention(MentionData::default()),
            other => ElementKind::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        Some(match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::Heading1 => "heading-1",
            ElementKind::Heading2 => "heading-2",
            ElementKind::Heading3 => "heading-3",
            ElementKind::BlockQuote => "block-quote",
            ElementKind::BulletedList => "bulleted-list",
            ElementKind::NumberedList => "numbered-list",
            ElementKind::ListItem => "list-item",
            ElementKind::Section => "section",
            ElementKind::SectionTitle => "section-title",
            ElementKind::Mention(_) => "mention",
            ElementKind::Other(tag) => tag.as_str(),
            ElementKind::Untyped => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "RawElement")]
pub struct Element {
    pub kind: ElementKind,
    pub children: Vec<Node>,
    /// Element properties this model does not interpret. Written back unchanged.
    pub attrs: Attrs,
}

impl Element {
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            children,
            attrs: Attrs::default(),
        }
    }

    pub fn mention(data: MentionData) -> Self {
        // Slate inline voids still carry one empty text child.
        Self::new(ElementKind::Mention(data), vec![Node::text("")])
    }

    /// A non-string `type` keeps its raw value in `attrs` and the element is
    /// treated as untyped.
    fn from_attrs(mut attrs: Attrs) -> Result<Self, DocumentError> {
        let children = match attrs.remove(CHILDREN) {
            None => Vec::new(),
            Some(Value::Array(children)) => children
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()
                .map_err(|_| DocumentError::invalid("element child is not a node"))?,
            Some(_) => return Err(DocumentError::invalid("element `children` is not an array")),
        };

        let kind = match take_string(&mut attrs, TYPE).as_deref() {
            None => ElementKind::Untyped,
            Some("mention") => ElementKind::Mention(MentionData {
                author_id: take_string(&mut attrs, MENTION_AUTHOR_ID),
                author_username: take_string(&mut attrs, MENTION_AUTHOR_USERNAME),
                post_id: take_string(&mut attrs, MENTION_POST_ID),
                value: take_string(&mut attrs, MENTION_VALUE),
            }),
            Some(tag) => ElementKind::from_tag(tag),
        };

        Ok(Self {
            kind,
            children,
            attrs,
        })
    }
}

impl<'de> Deserialize<'de> for TextLeaf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TextLeaf::from_attrs(Attrs::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Element::from_attrs(Attrs::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

const MENTION_AUTHOR_ID: &str = "authorId";
const MENTION_AUTHOR_USERNAME: &str = "authorUsername";
const MENTION_POST_ID: &str = "postId";
const MENTION_VALUE: &str = "value";

#[derive(Serialize)]
struct RawElement {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    children: Vec<Node>,
    #[serde(flatten)]
    attrs: Attrs,
}

fn take_bool(attrs: &mut Attrs, key: &str) -> Option<bool> {
    let Some(Value::Bool(value)) = attrs.get(key) else {
        return None;
    };
    let value = *value;
    attrs.remove(key);
    Some(value)
}

fn take_string(attrs: &mut Attrs, key: &str) -> Option<String> {
    if !matches!(attrs.get(key), Some(Value::String(_))) {
        return None;
    }
    match attrs.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        let Element {
            kind,
            children,
            mut attrs,
        } = element;

        let tag = kind.tag().map(str::to_string);
        if let ElementKind::Mention(data) = kind {
            let fields = [
                (MENTION_AUTHOR_ID, data.author_id),
                (MENTION_AUTHOR_USERNAME, data.author_username),
                (MENTION_POST_ID, data.post_id),
                (MENTION_VALUE, data.value),
            ];
            for (key, value) in fields {
                if let Some(value) = value {
                    attrs.insert(key.to_string(), Value::String(value));
                }
            }
        }

        Self {
            kind: tag,
            children,
            attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mention_attributes_are_lifted_into_typed_payload() {
        let node: Node = serde_json::from_value(json!({
            "type": "mention",
            "authorId": "u1",
            "authorUsername": "ada",
            "postId": "p9",
            "value": "Engines",
            "children": [{ "text": "" }]
        }))
        .expect("deserialize");

        let Node::Element(element) = node else {
            panic!("expected element");
        };
        let ElementKind::Mention(data) = &element.kind else {
            panic!("expected mention");
        };
        assert!(data.is_complete());
        assert_eq!(data.author_username.as_deref(), Some("ada"));
        assert!(element.attrs.is_empty());
    }

    #[test]
    fn non_string_mention_fields_stay_in_attrs() {
        let source = json!({
            "type": "mention",
            "postId": 42,
            "value": "Answer",
            "children": [{ "text": "" }]
        });
        let node: Node = serde_json::from_value(source.clone()).expect("deserialize");
        let Node::Element(element) = &node else {
            panic!("expected element");
        };
        let ElementKind::Mention(data) = &element.kind else {
            panic!("expected mention");
        };
        assert_eq!(data.post_id, None);
        assert!(!data.is_complete());
        assert_eq!(serde_json::to_value(&node).expect("serialize"), source);
    }

    #[test]
    fn leaf_marks_default_to_false() {
        let leaf: TextLeaf =
            serde_json::from_value(json!({ "text": "x", "italic": true })).expect("deserialize");
        assert_eq!(
            leaf.marks(),
            Marks {
                italic: true,
                ..Marks::default()
            }
        );
    }

    #[test]
    fn untyped_elements_serialize_without_type() {
        let source = json!({ "children": [{ "text": "loose" }] });
        let node: Node = serde_json::from_value(source.clone()).expect("deserialize");
        assert_eq!(
            node.as_element().map(|el| &el.kind),
            Some(&ElementKind::Untyped)
        );
        assert_eq!(serde_json::to_value(&node).expect("serialize"), source);
    }
}
