use village_richtext::{SELECTED_CLASS, Tag, View};

/// Formatting accumulated while descending through inline wrappers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub code: bool,
    pub selected: bool,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub style: SpanStyle,
}

fn is_text_tag(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::Span | Tag::Strong | Tag::Emphasis | Tag::Underline | Tag::Code | Tag::Link | Tag::Tooltip
    )
}

/// Whether `view` can be laid out as a single run of styled text.
pub fn is_text_run(view: &View) -> bool {
    match view {
        View::Text(_) => true,
        View::Fragment(children) => children.iter().all(is_text_run),
        View::Element(element) => {
            is_text_tag(element.tag) && element.children.iter().all(is_text_run)
        }
    }
}

/// Flattens an inline subtree into styled spans. Adjacent spans with equal
/// styles are merged and empty text is dropped.
pub fn flatten_inline(view: &View) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect(view, &SpanStyle::default(), &mut spans);
    spans
}

fn collect(view: &View, style: &SpanStyle, out: &mut Vec<InlineSpan>) {
    match view {
        View::Text(text) => push(out, text, style),
        View::Fragment(children) => {
            for child in children {
                collect(child, style, out);
            }
        }
        View::Element(element) => {
            let mut style = style.clone();
            match element.tag {
                Tag::Strong => style.bold = true,
                Tag::Emphasis => style.italic = true,
                Tag::Underline => style.underline = true,
                Tag::Code => style.code = true,
                Tag::Span if element.has_class(SELECTED_CLASS) => style.selected = true,
                Tag::Link => style.link = element.get_attr("href").map(str::to_string),
                _ => {}
            }
            for child in &element.children {
                collect(child, &style, out);
            }
        }
    }
}

fn push(out: &mut Vec<InlineSpan>, text: &str, style: &SpanStyle) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = out.last_mut()
        && last.style == *style
    {
        last.text.push_str(text);
        return;
    }
    out.push(InlineSpan {
        text: text.to_string(),
        style: style.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use village_richtext::{
        DefaultRoutes, Element, ElementKind, Flavor, Icon, LeafState, Marks, MemoryDiagnostics,
        MentionData, Node, RenderContext, TextLeaf, ViewElement, render_leaf, render_static,
    };

    #[test]
    fn leaf_chain_flattens_to_one_span() {
        let leaf = TextLeaf::new("hi").with_marks(Marks {
            bold: true,
            italic: true,
            underline: true,
            code: true,
        });
        let view = render_leaf(
            &leaf,
            LeafState {
                selected: true,
                focused: true,
            },
        );
        assert!(is_text_run(&view));

        let spans = flatten_inline(&view);
        assert_eq!(spans.len(), 1);
        let style = &spans[0].style;
        assert!(style.bold && style.italic && style.underline && style.code && style.selected);
        assert_eq!(spans[0].text, "hi");
    }

    #[test]
    fn adjacent_plain_spans_merge() {
        let view = View::Fragment(vec![View::text("a"), View::text(""), View::text("b")]);
        assert_eq!(
            flatten_inline(&view),
            vec![InlineSpan {
                text: "ab".into(),
                style: SpanStyle::default(),
            }]
        );
    }

    #[test]
    fn mention_link_keeps_href() {
        let diagnostics = MemoryDiagnostics::new();
        let ctx = RenderContext::new(Flavor::Village, &DefaultRoutes, &diagnostics);
        let doc = vec![Node::element(
            ElementKind::Paragraph,
            vec![
                Node::text("see "),
                Node::Element(Element::mention(MentionData {
                    author_id: Some("a".into()),
                    author_username: Some("ann".into()),
                    post_id: Some("p".into()),
                    value: Some("Post".into()),
                })),
            ],
        )];
        let View::Fragment(blocks) = render_static(&doc, &ctx) else {
            panic!("documents render as fragments");
        };
        let paragraph = blocks[0].as_element().expect("paragraph");

        let spans = flatten_inline(&View::Fragment(paragraph.children.clone()));
        assert_eq!(spans[0].text, "see ");
        assert_eq!(spans[1].text, "Post");
        assert_eq!(spans[1].style.link.as_deref(), Some("/post/a/p"));
    }

    #[test]
    fn icons_break_text_runs() {
        let view = ViewElement::new(Tag::Span)
            .child(ViewElement::new(Tag::Icon(Icon::Delete)))
            .into_view();
        assert!(!is_text_run(&view));
    }
}
