//! Target backend trait for format-specific tag emission.
//!
//! The engine decides *when* a block opens, continues or closes; a backend
//! decides what that looks like in its output format. Block callbacks write
//! into the pass output buffer, mirroring how text is accumulated for a line.

use crate::inline::Beautifier;
use crate::markup::Markup;
use crate::types::{ImageLink, TableCell};

/// Backend trait for format-specific rendering operations.
///
/// Implementations:
/// - [`HtmlBackend`](crate::HtmlBackend): HTML fragments
/// - [`ManBackend`](crate::ManBackend): `man(7)` macros with `tbl` tables
/// - [`WikiBackend`](crate::WikiBackend): `MediaWiki` markup
pub trait TargetBackend {
    /// Short target name used in log fields.
    const NAME: &'static str;

    /// Open a block whose first line carries `text`.
    ///
    /// For titles the caller writes the title text itself between
    /// `block_start` and [`block_end`](Self::block_end), so `text` is only
    /// informational there.
    fn block_start(&mut self, markup: Markup, text: &str, out: &mut String);

    /// Continue an open block with another line or item.
    fn block_item(&mut self, markup: Markup, text: &str, out: &mut String);

    /// Close a block.
    fn block_end(&mut self, markup: Markup, out: &mut String);

    /// Render a description line of a definition list.
    ///
    /// Default passes the text through unchanged.
    fn describe_term(&mut self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    /// Open a table.
    fn table_start(&mut self, markup: Markup, has_border: bool, centered: bool, out: &mut String);

    /// Render one table row, including any row delimiters.
    fn table_row(&mut self, markup: Markup, cells: &[TableCell], out: &mut String);

    /// Target start and end tags replacing a beautifier's delimiters.
    fn beautifier_tags(&self, kind: Beautifier) -> (&'static str, &'static str);

    /// Render an image.
    fn image(&self, image: &ImageLink, out: &mut String);

    /// Render a link. The label may already hold rendered image markup.
    fn link(&self, link: &ImageLink, out: &mut String);

    /// Whether `candidate`, a bracketed span found by the named-link pass, is
    /// markup this backend produced earlier and must not be substituted again.
    ///
    /// Default is `false`, for formats whose output never uses brackets.
    fn already_rendered(&self, _candidate: &str) -> bool {
        false
    }

    /// Track the number of open list nesting levels.
    ///
    /// Default ignores depth, for formats that nest through tags.
    fn set_list_depth(&mut self, _depth: usize) {}
}
