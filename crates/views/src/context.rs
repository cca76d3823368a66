use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use village_richtext::{DefaultRoutes, Diagnostics, PreviewOptions, Routes, TracingDiagnostics};

use crate::records::UserRecord;

/// `MMM d`, e.g. "Mar 4".
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    #[serde(default)]
    pub preview: PreviewOptions,
    /// `chrono` format string for post dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            preview: PreviewOptions::default(),
            date_format: default_date_format(),
        }
    }
}

impl ViewOptions {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(s).map(Self::with_defaults)
    }

    /// Blank or unparseable date formats fall back to [`DEFAULT_DATE_FORMAT`].
    pub fn with_defaults(mut self) -> Self {
        if self.date_format.trim().is_empty() {
            self.date_format = default_date_format();
        } else if !is_valid_date_format(&self.date_format) {
            tracing::warn!(date_format = %self.date_format, "invalid date format, using default");
            self.date_format = default_date_format();
        }
        self.preview = self.preview.with_defaults();
        self
    }

    /// Formats `date` with the configured format, or the default one when the
    /// configured format does not parse.
    pub fn format_date(&self, date: DateTime<Utc>) -> String {
        let format = if is_valid_date_format(&self.date_format) {
            self.date_format.as_str()
        } else {
            DEFAULT_DATE_FORMAT
        };
        date.format(format).to_string()
    }
}

pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Everything a view needs besides its own data: routes, diagnostics, who is
/// looking, and the current time.
pub struct ViewContext<'a> {
    pub routes: &'a dyn Routes,
    pub diagnostics: &'a dyn Diagnostics,
    pub viewer: Option<&'a UserRecord>,
    pub now: DateTime<Utc>,
    pub options: ViewOptions,
}

impl<'a> ViewContext<'a> {
    pub fn new(routes: &'a dyn Routes, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            routes,
            diagnostics,
            viewer: None,
            now: Utc::now(),
            options: ViewOptions::default(),
        }
    }

    pub fn with_viewer(mut self, viewer: Option<&'a UserRecord>) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options.with_defaults();
        self
    }

    pub fn viewer_is(&self, user: &UserRecord) -> bool {
        self.viewer.is_some_and(|viewer| viewer.uid == user.uid)
    }
}

impl ViewContext<'static> {
    pub fn tracing() -> Self {
        Self::new(&DefaultRoutes, &TracingDiagnostics)
    }
}
