mod element;
mod inline;
mod theme;

pub use element::*;
pub use inline::{InlineSpan, SpanStyle, flatten_inline, is_text_run};
pub use theme::RichTextTheme;
