use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::{
    AnyElement, App, ElementId, FontStyle, FontWeight, InteractiveElement as _, InteractiveText,
    IntoElement, ParentElement as _, RenderOnce, SharedString, StatefulInteractiveElement as _,
    Styled as _, StyledText, TextStyle, UnderlineStyle, Window, div, px,
};
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::tooltip::Tooltip;
use gpui_component::{Disableable as _, IconName, Sizable as _, h_flex, v_flex};
use village_richtext::{
    COMPACT_BLOCKQUOTE_CLASS, COMPACT_PARAGRAPH_CLASS, Icon, Node, RenderContext, Tag, TextVariant,
    View, ViewElement, render_static,
};

use crate::inline::{SpanStyle, flatten_inline, is_text_run};
use crate::theme::RichTextTheme;

type NavigateHandler = Rc<dyn Fn(&str, &mut Window, &mut App)>;

fn monospace_font_family() -> SharedString {
    #[cfg(target_os = "macos")]
    {
        "Menlo".into()
    }
    #[cfg(target_os = "windows")]
    {
        "Consolas".into()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        "monospace".into()
    }
}

fn icon_name(icon: Icon) -> IconName {
    match icon {
        Icon::LibraryBooks => IconName::GalleryVerticalEnd,
        Icon::CallReceived => IconName::Info,
        Icon::MoreHoriz => IconName::Menu,
        Icon::Delete => IconName::Minus,
    }
}

fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 2.0,
        2 => 1.6,
        3 => 1.35,
        4 => 1.2,
        5 => 1.1,
        _ => 1.0,
    }
}

/// Displays a rendered [`View`] tree with gpui elements.
#[derive(IntoElement)]
pub struct RichTextView {
    id: SharedString,
    view: View,
    theme: Option<RichTextTheme>,
    on_navigate: Option<NavigateHandler>,
}

impl RichTextView {
    pub fn new(id: impl Into<SharedString>, view: View) -> Self {
        Self {
            id: id.into(),
            view,
            theme: None,
            on_navigate: None,
        }
    }

    /// Renders `doc` with nothing selected.
    pub fn document(id: impl Into<SharedString>, doc: &[Node], ctx: &RenderContext<'_>) -> Self {
        Self::new(id, render_static(doc, ctx))
    }

    /// Overrides the colors taken from the active theme.
    pub fn theme(mut self, theme: RichTextTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Called with the `href` of a clicked link.
    pub fn on_navigate(mut self, handler: impl Fn(&str, &mut Window, &mut App) + 'static) -> Self {
        self.on_navigate = Some(Rc::new(handler));
        self
    }
}

impl RenderOnce for RichTextView {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        use gpui_component::ActiveTheme as _;

        let theme = self
            .theme
            .unwrap_or_else(|| RichTextTheme::from_component_theme(cx.theme()));
        let base = window.text_style();
        let text_size = f32::from(base.font_size.to_pixels(window.rem_size()));

        let renderer = Renderer {
            prefix: self.id,
            theme,
            text_size,
            on_navigate: self.on_navigate,
        };
        let mut style = base;
        style.color = theme.foreground;

        v_flex()
            .gap(px(4.))
            .text_color(theme.foreground)
            .children(renderer.render(&self.view, "0", &style))
    }
}

struct Renderer {
    prefix: SharedString,
    theme: RichTextTheme,
    text_size: f32,
    on_navigate: Option<NavigateHandler>,
}

impl Renderer {
    fn element_id(&self, path: &str) -> ElementId {
        ElementId::Name(format!("{}-{path}", self.prefix).into())
    }

    fn render(&self, view: &View, path: &str, style: &TextStyle) -> Vec<AnyElement> {
        match view {
            View::Text(_) => vec![self.text(&[view], path, style)],
            View::Fragment(children) => self.children(children, path, style),
            View::Element(_) if is_text_run(view) => vec![self.text(&[view], path, style)],
            View::Element(element) => vec![self.element(element, path, style)],
        }
    }

    /// Consecutive text runs share one text element.
    fn children(&self, children: &[View], path: &str, style: &TextStyle) -> Vec<AnyElement> {
        let mut out = Vec::with_capacity(children.len());
        let mut pending: Vec<&View> = Vec::new();

        for (ix, child) in children.iter().enumerate() {
            if is_text_run(child) {
                pending.push(child);
                continue;
            }
            if !pending.is_empty() {
                out.push(self.text(&pending, &format!("{path}.{ix}t"), style));
                pending.clear();
            }
            out.extend(self.render(child, &format!("{path}.{ix}"), style));
        }
        if !pending.is_empty() {
            out.push(self.text(&pending, &format!("{path}.end"), style));
        }
        out
    }

    fn run_style(&self, base: &TextStyle, span: &SpanStyle) -> TextStyle {
        let mut style = base.clone();
        if span.bold {
            style.font_weight = FontWeight::BOLD;
        }
        if span.italic {
            style.font_style = FontStyle::Italic;
        }
        if span.code {
            style.font_family = monospace_font_family();
            style.background_color = Some(self.theme.code_background);
        }
        if span.underline {
            style.underline = Some(UnderlineStyle {
                thickness: px(1.),
                color: None,
                wavy: false,
            });
        }
        if span.link.is_some() {
            style.color = self.theme.link;
            if let Some(underline) = style.underline.as_mut() {
                underline.color = Some(self.theme.link);
            }
        }
        if span.selected {
            style.background_color = Some(self.theme.selection);
        }
        style
    }

    fn text(&self, views: &[&View], path: &str, style: &TextStyle) -> AnyElement {
        let spans: Vec<_> = views.iter().flat_map(|view| flatten_inline(view)).collect();
        if spans.is_empty() {
            return div().into_any_element();
        }

        let mut text = String::new();
        let mut runs = Vec::with_capacity(spans.len());
        let mut links = Vec::new();
        for span in &spans {
            let start = text.len();
            text.push_str(&span.text);
            runs.push(self.run_style(style, &span.style).to_run(span.text.len()));
            if let Some(href) = span.style.link.clone() {
                links.push((start..text.len(), href));
            }
        }

        let styled = StyledText::new(text).with_runs(runs);
        match self.on_navigate.clone() {
            Some(handler) if !links.is_empty() => {
                let (ranges, hrefs): (Vec<_>, Vec<String>) = links.into_iter().unzip();
                InteractiveText::new(self.element_id(path), styled)
                    .on_click(ranges, move |ix, window, cx| {
                        if let Some(href) = hrefs.get(ix) {
                            handler(href, window, cx);
                        }
                    })
                    .into_any_element()
            }
            _ => styled.into_any_element(),
        }
    }

    fn element(&self, element: &ViewElement, path: &str, style: &TextStyle) -> AnyElement {
        let theme = self.theme;
        match element.tag {
            Tag::Typography { variant, paragraph } => {
                let mut inner = style.clone();
                let scale = match variant.heading_level() {
                    Some(level) => {
                        inner.font_weight = FontWeight::SEMIBOLD;
                        heading_scale(level)
                    }
                    None if variant == TextVariant::Body2 => 0.875,
                    None => 1.0,
                };
                let compact = element.has_class(COMPACT_PARAGRAPH_CLASS);
                div()
                    .text_size(px(self.text_size * scale))
                    .when(paragraph && !compact, |this| this.pb(px(8.)))
                    .children(self.children(&element.children, path, &inner))
                    .into_any_element()
            }
            Tag::Blockquote => {
                let mut inner = style.clone();
                inner.color = theme.muted_foreground;
                let compact = element.has_class(COMPACT_BLOCKQUOTE_CLASS);
                v_flex()
                    .border_l_2()
                    .border_color(theme.border)
                    .pl(px(12.))
                    .when(!compact, |this| this.my(px(8.)))
                    .children(self.children(&element.children, path, &inner))
                    .into_any_element()
            }
            Tag::UnorderedList => self.list(element, path, style, false),
            Tag::OrderedList => self.list(element, path, style, true),
            Tag::Section | Tag::ListItem => v_flex()
                .gap(px(4.))
                .children(self.children(&element.children, path, style))
                .into_any_element(),
            Tag::SectionTitle => {
                let mut inner = style.clone();
                inner.font_weight = FontWeight::SEMIBOLD;
                div()
                    .children(self.children(&element.children, path, &inner))
                    .into_any_element()
            }
            Tag::Divider => div()
                .w_full()
                .h(px(1.))
                .my(px(8.))
                .bg(theme.border)
                .into_any_element(),
            Tag::Link => {
                let mut inner = style.clone();
                inner.color = theme.link;
                let href = element.get_attr("href").map(str::to_string);
                div()
                    .id(self.element_id(path))
                    .cursor_pointer()
                    .when_some(
                        href.zip(self.on_navigate.clone()),
                        |this, (href, handler)| {
                            this.on_click(move |_, window, cx| handler(&href, window, cx))
                        },
                    )
                    .children(self.children(&element.children, path, &inner))
                    .into_any_element()
            }
            Tag::Tooltip => {
                let title: Option<SharedString> =
                    element.get_attr("title").map(|title| title.to_string().into());
                div()
                    .id(self.element_id(path))
                    .when_some(title, |this, title| {
                        this.tooltip(move |window, cx| Tooltip::new(title.clone()).build(window, cx))
                    })
                    .children(self.children(&element.children, path, style))
                    .into_any_element()
            }
            Tag::IconButton => {
                let icon = element.children.iter().find_map(|child| match child.as_element() {
                    Some(ViewElement {
                        tag: Tag::Icon(icon),
                        ..
                    }) => Some(*icon),
                    _ => None,
                });
                Button::new(self.element_id(path))
                    .when_some(icon, |this, icon| this.icon(icon_name(icon)))
                    .ghost()
                    .small()
                    .disabled(element.get_attr("disabled").is_some())
                    .into_any_element()
            }
            Tag::Icon(icon) => div()
                .text_color(theme.muted_foreground)
                .child(gpui_component::Icon::new(icon_name(icon)))
                .into_any_element(),
            Tag::Menu => v_flex()
                .p(px(4.))
                .rounded(theme.radius)
                .border_1()
                .border_color(theme.border)
                .bg(theme.menu_background)
                .children(self.children(&element.children, path, style))
                .into_any_element(),
            Tag::MenuItem => h_flex()
                .gap(px(6.))
                .px(px(8.))
                .py(px(4.))
                .items_center()
                .children(self.children(&element.children, path, style))
                .into_any_element(),
            Tag::Div
            | Tag::Span
            | Tag::Strong
            | Tag::Emphasis
            | Tag::Underline
            | Tag::Code => {
                let row = element.tag != Tag::Div
                    || element.children.iter().all(|child| match child {
                        View::Text(_) => true,
                        View::Element(el) => el.tag.is_inline(),
                        View::Fragment(_) => false,
                    });
                let children = self.children(&element.children, path, style);
                if row {
                    h_flex()
                        .gap(px(4.))
                        .items_center()
                        .children(children)
                        .into_any_element()
                } else {
                    v_flex().children(children).into_any_element()
                }
            }
        }
    }

    fn list(&self, element: &ViewElement, path: &str, style: &TextStyle, ordered: bool) -> AnyElement {
        let muted = self.theme.muted_foreground;
        let items: Vec<AnyElement> = element
            .children
            .iter()
            .enumerate()
            .map(|(ix, child)| {
                let path = format!("{path}.{ix}");
                let content = match child {
                    View::Element(item) if item.tag == Tag::ListItem => {
                        self.children(&item.children, &path, style)
                    }
                    other => self.render(other, &path, style),
                };
                let marker = if ordered {
                    format!("{}.", ix + 1)
                } else {
                    "•".to_string()
                };
                h_flex()
                    .items_start()
                    .gap(px(6.))
                    .child(div().text_color(muted).child(marker))
                    .child(v_flex().flex_1().children(content))
                    .into_any_element()
            })
            .collect();

        v_flex().gap(px(2.)).pl(px(4.)).children(items).into_any_element()
    }
}
