//! The renderer-agnostic section model.

use serde::Serialize;

/// A titled group of text lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new<I, S>(title: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: Some(title.into()),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn untitled<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: None,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// `label: value` line used throughout the templates.
pub fn field_line(label: &str, value: impl AsRef<str>) -> String {
    format!("{}: {}", label, value.as_ref())
}
