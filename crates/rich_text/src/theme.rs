use gpui::{Hsla, Pixels, hsla, px};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RichTextTheme {
    pub border: Hsla,
    pub radius: Pixels,
    pub foreground: Hsla,
    pub muted_foreground: Hsla,
    pub link: Hsla,
    pub selection: Hsla,
    pub code_background: Hsla,
    pub menu_background: Hsla,
}

impl Default for RichTextTheme {
    fn default() -> Self {
        Self {
            border: hsla(0., 0., 0.88, 1.),
            radius: px(8.),
            foreground: hsla(0., 0., 0.12, 1.),
            muted_foreground: hsla(0., 0., 0.42, 1.),
            link: hsla(0.58, 1.0, 0.5, 1.0),
            selection: hsla(0.58, 1.0, 0.5, 0.25),
            code_background: hsla(0., 0., 0.94, 1.),
            menu_background: hsla(0., 0., 1., 1.),
        }
    }
}

impl RichTextTheme {
    /// Picks colors from the active `gpui_component` theme.
    pub fn from_component_theme(theme: &gpui_component::Theme) -> Self {
        Self {
            border: theme.border,
            radius: theme.radius,
            foreground: theme.foreground,
            muted_foreground: theme.muted_foreground,
            link: theme.link,
            selection: theme.selection,
            code_background: theme.muted,
            menu_background: theme.popover,
        }
    }
}
