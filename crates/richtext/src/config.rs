use serde::{Deserialize, Serialize};

/// Number of text runs a preview keeps by default.
pub const DEFAULT_PREVIEW_LINES: usize = 3;

fn default_preview_lines() -> usize {
    DEFAULT_PREVIEW_LINES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Use the reduced-spacing paragraph and blockquote variants.
    #[serde(default)]
    pub compact: bool,
}

impl RenderOptions {
    pub fn compact() -> Self {
        Self { compact: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOptions {
    #[serde(default = "default_preview_lines")]
    pub max_lines: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_PREVIEW_LINES,
        }
    }
}

impl PreviewOptions {
    /// A zero limit falls back to the default instead of producing empty previews.
    pub fn with_defaults(mut self) -> Self {
        if self.max_lines == 0 {
            self.max_lines = DEFAULT_PREVIEW_LINES;
        }
        self
    }
}
