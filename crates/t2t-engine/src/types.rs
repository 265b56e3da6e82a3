//! Value types passed between the block processors, the inline engine and
//! the target backends.

use std::fmt;

/// Horizontal alignment of an image, link or table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

impl TextAlign {
    /// Derive alignment from where a span sits on its line.
    ///
    /// A span at the very start of the line is left aligned, one that reaches
    /// the end of the line (or stops one character short of it) is right
    /// aligned, and anything in between is centered.
    #[must_use]
    pub fn from_position(line: &str, start: usize, end: usize) -> Self {
        if start == 0 {
            Self::Left
        } else if end + 1 >= line.len() {
            Self::Right
        } else {
            Self::Center
        }
    }

    /// CSS keyword for this alignment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }

    /// Single-letter column key used by `tbl` format lines.
    #[must_use]
    pub fn tbl_key(self) -> char {
        match self {
            Self::Left => 'l',
            Self::Right => 'r',
            Self::Center => 'c',
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image or link located by the inline engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLink {
    /// Image path or link URL.
    pub path: String,
    /// Position-derived alignment.
    pub align: TextAlign,
    /// Link label; empty for bare images and unlabelled links.
    pub label: String,
}

impl ImageLink {
    /// Create a descriptor without a label.
    pub fn new(path: impl Into<String>, align: TextAlign) -> Self {
        Self {
            path: path.into(),
            align,
            label: String::new(),
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// One cell of a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Substituted cell text, `None` when the cell is absorbed by the
    /// column span of the cell before it.
    pub text: Option<String>,
    pub align: TextAlign,
    pub has_border: bool,
    pub colspan: usize,
}

impl TableCell {
    /// Create a visible cell spanning a single column.
    pub fn new(text: impl Into<String>, align: TextAlign, has_border: bool) -> Self {
        Self {
            text: Some(text.into()),
            align,
            has_border,
            colspan: 1,
        }
    }

    /// Create a placeholder for a cell swallowed by a column span.
    #[must_use]
    pub fn spanned() -> Self {
        Self {
            text: None,
            align: TextAlign::Left,
            has_border: false,
            colspan: 1,
        }
    }
}
