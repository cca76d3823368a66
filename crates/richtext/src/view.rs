use std::collections::BTreeMap;

pub type ViewAttrs = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVariant {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Body1,
    Body2,
}

impl TextVariant {
    pub fn heading_level(self) -> Option<u8> {
        match self {
            TextVariant::H1 => Some(1),
            TextVariant::H2 => Some(2),
            TextVariant::H3 => Some(3),
            TextVariant::H4 => Some(4),
            TextVariant::H5 => Some(5),
            TextVariant::H6 => Some(6),
            TextVariant::Body1 | TextVariant::Body2 => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TextVariant::H1 => "h1",
            TextVariant::H2 => "h2",
            TextVariant::H3 => "h3",
            TextVariant::H4 => "h4",
            TextVariant::H5 => "h5",
            TextVariant::H6 => "h6",
            TextVariant::Body1 => "body1",
            TextVariant::Body2 => "body2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    LibraryBooks,
    CallReceived,
    MoreHoriz,
    Delete,
}

impl Icon {
    pub fn name(self) -> &'static str {
        match self {
            Icon::LibraryBooks => "library-books",
            Icon::CallReceived => "call-received",
            Icon::MoreHoriz => "more-horiz",
            Icon::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Span,
    Strong,
    Emphasis,
    Underline,
    Code,
    Blockquote,
    UnorderedList,
    OrderedList,
    ListItem,
    Typography { variant: TextVariant, paragraph: bool },
    Link,
    Tooltip,
    Section,
    SectionTitle,
    Divider,
    IconButton,
    Icon(Icon),
    Menu,
    MenuItem,
}

impl Tag {
    pub fn typography(variant: TextVariant) -> Self {
        Tag::Typography {
            variant,
            paragraph: false,
        }
    }

    pub fn paragraph(variant: TextVariant) -> Self {
        Tag::Typography {
            variant,
            paragraph: true,
        }
    }

    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Tag::Span
                | Tag::Strong
                | Tag::Emphasis
                | Tag::Underline
                | Tag::Code
                | Tag::Link
                | Tag::Tooltip
                | Tag::Icon(_)
        )
    }

    pub fn html_name(self) -> &'static str {
        match self {
            Tag::Div | Tag::Menu => "div",
            Tag::Span | Tag::Tooltip => "span",
            Tag::Strong => "strong",
            Tag::Emphasis => "em",
            Tag::Underline => "u",
            Tag::Code => "code",
            Tag::Blockquote => "blockquote",
            Tag::UnorderedList => "ul",
            Tag::OrderedList => "ol",
            Tag::ListItem | Tag::MenuItem => "li",
            Tag::Typography { variant, .. } => match variant.heading_level() {
                Some(1) => "h1",
                Some(2) => "h2",
                Some(3) => "h3",
                Some(4) => "h4",
                Some(5) => "h5",
                Some(_) => "h6",
                None => "p",
            },
            Tag::Link => "a",
            Tag::Section => "section",
            Tag::SectionTitle => "header",
            Tag::Divider => "hr",
            Tag::IconButton => "button",
            Tag::Icon(_) => "i",
        }
    }

    fn is_void(self) -> bool {
        matches!(self, Tag::Divider)
    }
}

/// A rendered, framework-independent view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Element(ViewElement),
    Text(String),
    Fragment(Vec<View>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewElement {
    pub tag: Tag,
    pub attrs: ViewAttrs,
    pub children: Vec<View>,
}

impl View {
    pub fn text(text: impl Into<String>) -> Self {
        View::Text(text.into())
    }

    pub fn empty() -> Self {
        View::Fragment(Vec::new())
    }

    pub fn as_element(&self) -> Option<&ViewElement> {
        match self {
            View::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Text(text) => out.push_str(text),
            View::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            View::Fragment(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// First element in the subtree (pre-order) matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&ViewElement) -> bool) -> Option<&ViewElement> {
        match self {
            View::Text(_) => None,
            View::Element(element) => {
                if predicate(element) {
                    return Some(element);
                }
                element.children.iter().find_map(|child| child.find(predicate))
            }
            View::Fragment(children) => children.iter().find_map(|child| child.find(predicate)),
        }
    }

    pub fn find_all(&self, predicate: &dyn Fn(&ViewElement) -> bool) -> Vec<&ViewElement> {
        let mut out = Vec::new();
        self.collect_matching(predicate, &mut out);
        out
    }

    fn collect_matching<'a>(
        &'a self,
        predicate: &dyn Fn(&ViewElement) -> bool,
        out: &mut Vec<&'a ViewElement>,
    ) {
        match self {
            View::Text(_) => {}
            View::Element(element) => {
                if predicate(element) {
                    out.push(element);
                }
                for child in &element.children {
                    child.collect_matching(predicate, out);
                }
            }
            View::Fragment(children) => {
                for child in children {
                    child.collect_matching(predicate, out);
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            View::Text(text) => out.push_str(&escape_html(text)),
            View::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            View::Element(element) => element.write_html(out),
        }
    }
}

impl From<ViewElement> for View {
    fn from(element: ViewElement) -> Self {
        View::Element(element)
    }
}

impl From<String> for View {
    fn from(text: String) -> Self {
        View::Text(text)
    }
}

impl From<&str> for View {
    fn from(text: &str) -> Self {
        View::Text(text.to_string())
    }
}

impl ViewElement {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: ViewAttrs::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn attrs(mut self, attrs: ViewAttrs) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Appends a class name, keeping any classes already set.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref();
        match self.attrs.get_mut("class") {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(class);
            }
            _ => {
                self.attrs.insert("class".to_string(), class.to_string());
            }
        }
        self
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn into_view(self) -> View {
        View::Element(self)
    }

    fn write_html(&self, out: &mut String) {
        let name = self.tag.html_name();
        out.push('<');
        out.push_str(name);

        let mut attrs = self.attrs.clone();
        match self.tag {
            Tag::Typography { variant, .. } if variant.heading_level().is_none() => {
                attrs
                    .entry("data-variant".to_string())
                    .or_insert_with(|| variant.name().to_string());
            }
            Tag::Icon(icon) => {
                attrs
                    .entry("data-icon".to_string())
                    .or_insert_with(|| icon.name().to_string());
            }
            _ => {}
        }
        for (key, value) in &attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');

        if self.tag.is_void() && self.children.is_empty() {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
