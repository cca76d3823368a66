use serde::{Deserialize, Serialize};

use crate::config::RenderOptions;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::document::{Element, ElementKind, MentionData, Node, TextLeaf};
use crate::routes::{DefaultRoutes, Routes};
use crate::view::{Tag, TextVariant, View, ViewAttrs, ViewElement};

pub const SELECTED_CLASS: &str = "selected";
pub const LINK_CLASS: &str = "link";
pub const COMPACT_PARAGRAPH_CLASS: &str = "compact-paragraph";
pub const COMPACT_BLOCKQUOTE_CLASS: &str = "compact-blockquote";

/// Which application's element table to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    #[default]
    Kmgmt,
    Village,
}

/// Editor selection state of a single leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeafState {
    pub selected: bool,
    pub focused: bool,
}

impl LeafState {
    pub fn highlighted(self) -> bool {
        self.selected && self.focused
    }
}

pub struct RenderContext<'a> {
    pub flavor: Flavor,
    pub options: RenderOptions,
    pub routes: &'a dyn Routes,
    pub diagnostics: &'a dyn Diagnostics,
}

impl<'a> RenderContext<'a> {
    pub fn new(flavor: Flavor, routes: &'a dyn Routes, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            flavor,
            options: RenderOptions::default(),
            routes,
            diagnostics,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

impl RenderContext<'static> {
    /// Default routes and `tracing` diagnostics.
    pub fn tracing(flavor: Flavor) -> Self {
        Self::new(flavor, &DefaultRoutes, &TracingDiagnostics)
    }
}

fn element_attributes() -> ViewAttrs {
    ViewAttrs::from([("data-slate-node".to_string(), "element".to_string())])
}

fn leaf_attributes() -> ViewAttrs {
    ViewAttrs::from([("data-slate-leaf".to_string(), "true".to_string())])
}

/// Renders one element around its already-rendered children.
///
/// Every kind yields a view; unknown tags render as a body paragraph.
pub fn render_element(element: &Element, children: Vec<View>, ctx: &RenderContext<'_>) -> View {
    match ctx.flavor {
        Flavor::Kmgmt => render_common(&element.kind, children),
        Flavor::Village => render_village(&element.kind, children, ctx),
    }
}

fn render_common(kind: &ElementKind, children: Vec<View>) -> View {
    let attributes = element_attributes();
    let el = match kind {
        ElementKind::Section => ViewElement::new(Tag::Section)
            .attrs(attributes)
            .children(children),
        ElementKind::SectionTitle => ViewElement::new(Tag::SectionTitle)
            .attrs(attributes)
            .children(children),
        ElementKind::BlockQuote => ViewElement::new(Tag::Blockquote)
            .attrs(attributes)
            .child(ViewElement::new(Tag::typography(TextVariant::Body1)).children(children)),
        ElementKind::BulletedList => ViewElement::new(Tag::UnorderedList)
            .attrs(attributes)
            .children(children),
        ElementKind::NumberedList => ViewElement::new(Tag::OrderedList)
            .attrs(attributes)
            .children(children),
        ElementKind::ListItem => ViewElement::new(Tag::ListItem)
            .attrs(attributes)
            .children(children),
        ElementKind::Heading1 => ViewElement::new(Tag::typography(TextVariant::H2))
            .attrs(attributes)
            .children(children),
        ElementKind::Heading2 => ViewElement::new(Tag::typography(TextVariant::H3))
            .attrs(attributes)
            .children(children),
        ElementKind::Paragraph
        | ElementKind::Heading3
        | ElementKind::Mention(_)
        | ElementKind::Other(_)
        | ElementKind::Untyped => ViewElement::new(Tag::paragraph(TextVariant::Body1))
            .attrs(attributes)
            .children(children),
    };
    el.into_view()
}

fn render_village(kind: &ElementKind, children: Vec<View>, ctx: &RenderContext<'_>) -> View {
    let compact = ctx.options.compact;
    match kind {
        ElementKind::Mention(mention) => render_mention(mention, children, ctx),
        ElementKind::BlockQuote => {
            let mut el = ViewElement::new(Tag::Blockquote);
            if compact {
                el = el.class(COMPACT_BLOCKQUOTE_CLASS);
            }
            el.children(children).into_view()
        }
        ElementKind::Paragraph => {
            let mut el = ViewElement::new(Tag::paragraph(TextVariant::Body1));
            if compact {
                el = el.class(COMPACT_PARAGRAPH_CLASS);
            }
            el.children(children).into_view()
        }
        ElementKind::Heading2 => ViewElement::new(Tag::typography(TextVariant::H2))
            .children(children)
            .into_view(),
        ElementKind::Heading3 => ViewElement::new(Tag::typography(TextVariant::H3))
            .children(children)
            .into_view(),
        other => render_common(other, children),
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<missing>")
}

fn render_mention(mention: &MentionData, children: Vec<View>, ctx: &RenderContext<'_>) -> View {
    if !mention.is_complete() {
        ctx.diagnostics.warn(
            "MentionElement",
            &format!(
                "Invalid MentionNodeData; postId={}, authorId={}, authorUsername={}, title={}",
                field(&mention.post_id),
                field(&mention.author_id),
                field(&mention.author_username),
                field(&mention.value),
            ),
        );
    }

    let href = ctx.routes.post_url(
        mention.author_id.as_deref().unwrap_or_default(),
        mention.post_id.as_deref().unwrap_or_default(),
    );
    let label = mention.value.clone().unwrap_or_default();

    let mut link = ViewElement::new(Tag::Link)
        .attrs(element_attributes())
        .attr("data-slate-inline", "true")
        .attr("data-slate-void", "true")
        .attr("data-slate-value", label.as_str())
        .attr("contenteditable", "false")
        .attr("href", href)
        .class(LINK_CLASS);
    if !label.is_empty() {
        link = link.child(label);
    }

    let mut tooltip = ViewElement::new(Tag::Tooltip);
    if let Some(username) = mention.author_username.as_deref() {
        tooltip = tooltip.attr("title", username);
    }
    tooltip.child(link.children(children)).into_view()
}

/// Wraps a leaf's text in its formatting.
///
/// Outermost to innermost: selection highlight, bold, code, italic,
/// underline, base span. The order never depends on which flags are set.
pub fn render_leaf(leaf: &TextLeaf, state: LeafState) -> View {
    let marks = leaf.marks();

    let mut view = ViewElement::new(Tag::Span)
        .attrs(leaf_attributes())
        .child(leaf.text.as_str())
        .into_view();

    if marks.underline {
        view = ViewElement::new(Tag::Underline).child(view).into_view();
    }
    if marks.italic {
        view = ViewElement::new(Tag::Emphasis).child(view).into_view();
    }
    if marks.code {
        view = ViewElement::new(Tag::Code).child(view).into_view();
    }
    if marks.bold {
        view = ViewElement::new(Tag::Strong).child(view).into_view();
    }
    if state.highlighted() {
        view = ViewElement::new(Tag::Span)
            .class(SELECTED_CLASS)
            .child(view)
            .into_view();
    }
    view
}

/// Renders a whole document, asking `leaf_state` for the selection state of
/// each leaf by its path.
pub fn render_document(
    doc: &[Node],
    ctx: &RenderContext<'_>,
    leaf_state: &dyn Fn(&[usize]) -> LeafState,
) -> View {
    let mut path = Vec::new();
    View::Fragment(render_nodes(doc, ctx, leaf_state, &mut path))
}

/// Renders a document with nothing selected.
pub fn render_static(doc: &[Node], ctx: &RenderContext<'_>) -> View {
    render_document(doc, ctx, &|_| LeafState::default())
}

fn render_nodes(
    nodes: &[Node],
    ctx: &RenderContext<'_>,
    leaf_state: &dyn Fn(&[usize]) -> LeafState,
    path: &mut Vec<usize>,
) -> Vec<View> {
    let mut out = Vec::with_capacity(nodes.len());
    for (ix, node) in nodes.iter().enumerate() {
        path.push(ix);
        let view = match node {
            Node::Text(leaf) => render_leaf(leaf, leaf_state(path)),
            Node::Element(element) => {
                let children = render_nodes(&element.children, ctx, leaf_state, path);
                render_element(element, children, ctx)
            }
        };
        path.pop();
        out.push(view);
    }
    out
}
