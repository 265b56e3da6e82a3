//! `man(7)` backend.
//!
//! Lists are indented with `.RS`/`.RE` and tagged with `.IP`; ordered list
//! counters cycle through arabic, alphabetic and roman numerals by depth.
//! Tables are emitted for `tbl(1)`.

use std::fmt::Write;

use crate::backend::TargetBackend;
use crate::inline::{Beautifier, is_image};
use crate::markup::Markup;
use crate::state::TitleCounters;
use crate::types::{ImageLink, TableCell};
use crate::util::{to_lower_alpha, to_roman};

/// Nesting depths with their own ordered list counter.
const COUNTED_DEPTHS: usize = 5;

/// Column separator declared in the `tbl` options line.
const TBL_TAB: char = '^';

/// Options for a table whose format line is still pending.
#[derive(Debug, Clone, Copy)]
struct PendingTable {
    has_border: bool,
    centered: bool,
}

/// `man(7)` render backend.
#[derive(Debug, Default)]
pub struct ManBackend {
    titles: TitleCounters,
    list_depth: usize,
    list_counters: [usize; COUNTED_DEPTHS],
    pending_table: Option<PendingTable>,
}

impl ManBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next ordered list marker at the current depth.
    fn next_counter(&mut self) -> String {
        let depth = self.list_depth;
        let Some(counter) = self.list_counters.get_mut(depth) else {
            return "x".to_owned();
        };
        *counter += 1;
        match depth {
            0 | 3 => counter.to_string(),
            1 | 4 => to_lower_alpha(*counter),
            _ => to_roman(*counter),
        }
    }

    fn list_item(&mut self, markup: Markup, text: &str, out: &mut String) {
        let indent = 3 * self.list_depth;
        if markup == Markup::OrderedList {
            let counter = self.next_counter();
            write!(out, ".IP {counter} {indent}\n{text}").unwrap();
        } else {
            write!(out, ".IP \\(bu {indent}\n{text}").unwrap();
        }
    }

    /// `tbl` options and format line, one key per column.
    fn format_line(table: PendingTable, cells: &[TableCell], out: &mut String) {
        if table.has_border {
            out.push_str("allbox, ");
        }
        if table.centered {
            out.push_str("center, ");
        }
        write!(out, "tab({TBL_TAB}); ").unwrap();
        for cell in cells {
            out.push(if cell.text.is_some() { cell.align.tbl_key() } else { 's' });
        }
        out.push_str(".\n");
    }
}

/// Macro opening a heading.
fn title_macro(markup: Markup) -> &'static str {
    match markup.title_level() {
        Some(0) => ".TH",
        Some(1) => ".SH",
        _ => ".SS",
    }
}

impl TargetBackend for ManBackend {
    const NAME: &'static str = "man";

    fn block_start(&mut self, markup: Markup, text: &str, out: &mut String) {
        match markup {
            Markup::VerbatimLine => write!(out, ".nf\n{text}\n.fi").unwrap(),
            Markup::VerbatimArea => out.push_str(".nf"),
            Markup::Separator => out.push_str(&"-".repeat(20)),
            Markup::BoldSeparator => out.push_str(&"=".repeat(20)),
            Markup::TitleLevel1 | Markup::TitleLevel2 | Markup::TitleLevel3 => {
                write!(out, "{} ", title_macro(markup)).unwrap();
            }
            Markup::NumberedTitleLevel1 | Markup::NumberedTitleLevel2 | Markup::NumberedTitleLevel3 => {
                let counter = markup
                    .title_level()
                    .map(|level| self.titles.next(level))
                    .unwrap_or_default();
                write!(out, "{} {counter}", title_macro(markup)).unwrap();
            }
            Markup::UnorderedList | Markup::OrderedList => {
                if markup == Markup::OrderedList
                    && let Some(counter) = self.list_counters.get_mut(self.list_depth)
                {
                    *counter = 0;
                }
                out.push_str(".RS\n");
                self.list_item(markup, text, out);
            }
            Markup::DefinitionList => write!(out, ".TP\n{text}").unwrap(),
            Markup::QuotedParagraph => write!(out, ".P\n    {text}").unwrap(),
            Markup::Paragraph => write!(out, ".P\n{text}").unwrap(),
            Markup::RawArea
            | Markup::TaggedArea
            | Markup::ToDoBlock
            | Markup::ToDo
            | Markup::Table
            | Markup::TableHeader => {}
        }
    }

    fn block_item(&mut self, markup: Markup, text: &str, out: &mut String) {
        match markup {
            Markup::UnorderedList | Markup::OrderedList => self.list_item(markup, text, out),
            Markup::DefinitionList => write!(out, ".TP\n{text}").unwrap(),
            Markup::QuotedParagraph => write!(out, "    {text}").unwrap(),
            _ => out.push_str(text),
        }
    }

    fn block_end(&mut self, markup: Markup, out: &mut String) {
        match markup {
            Markup::VerbatimArea => out.push_str(".fi"),
            Markup::UnorderedList | Markup::OrderedList => out.push_str(".RE\n"),
            Markup::Table | Markup::TableHeader => {
                self.pending_table = None;
                out.push_str(".TE\n");
            }
            _ => {}
        }
    }

    fn table_start(&mut self, _markup: Markup, has_border: bool, centered: bool, out: &mut String) {
        self.pending_table = Some(PendingTable {
            has_border,
            centered,
        });
        out.push_str(".TS\n");
    }

    fn table_row(&mut self, markup: Markup, cells: &[TableCell], out: &mut String) {
        if let Some(table) = self.pending_table.take() {
            Self::format_line(table, cells, out);
        }

        out.push(' ');
        let mut first = true;
        for text in cells.iter().filter_map(|cell| cell.text.as_deref()) {
            if !first {
                out.push(TBL_TAB);
            }
            first = false;
            if markup == Markup::TableHeader {
                write!(out, "\\fB{text}\\fR").unwrap();
            } else {
                out.push_str(text);
            }
        }
    }

    fn beautifier_tags(&self, kind: Beautifier) -> (&'static str, &'static str) {
        match kind {
            Beautifier::Bold => ("\\fB", "\\fR"),
            Beautifier::Italic => ("\\fI", "\\fR"),
            Beautifier::SoftLineBreak
            | Beautifier::Underline
            | Beautifier::Strike
            | Beautifier::Monospace => ("", ""),
        }
    }

    fn image(&self, image: &ImageLink, out: &mut String) {
        out.push_str(&image.path);
    }

    fn link(&self, link: &ImageLink, out: &mut String) {
        if link.label.is_empty() {
            out.push_str(&link.path);
        } else if is_image(&link.label) {
            write!(out, "({}) ({})", link.label, link.path).unwrap();
        } else {
            write!(out, "{} ({})", link.label, link.path).unwrap();
        }
    }

    fn set_list_depth(&mut self, depth: usize) {
        self.list_depth = depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextAlign;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unordered_list() {
        let mut backend = ManBackend::new();
        let mut out = String::new();
        backend.block_start(Markup::UnorderedList, "one", &mut out);
        out.push('|');
        backend.block_item(Markup::UnorderedList, "two", &mut out);
        out.push('|');
        backend.block_end(Markup::UnorderedList, &mut out);
        assert_eq!(out, ".RS\n.IP \\(bu 0\none|.IP \\(bu 0\ntwo|.RE\n");
    }

    #[test]
    fn test_ordered_counters_by_depth() {
        let mut backend = ManBackend::new();
        let mut out = String::new();
        backend.block_start(Markup::OrderedList, "a", &mut out);
        backend.set_list_depth(1);
        out.clear();
        backend.block_start(Markup::OrderedList, "b", &mut out);
        assert_eq!(out, ".RS\n.IP a 3\nb");

        backend.set_list_depth(2);
        out.clear();
        backend.block_start(Markup::OrderedList, "c", &mut out);
        backend.block_item(Markup::OrderedList, "d", &mut out);
        assert_eq!(out, ".RS\n.IP i 6\nc.IP ii 6\nd");

        backend.set_list_depth(0);
        out.clear();
        backend.block_item(Markup::OrderedList, "e", &mut out);
        assert_eq!(out, ".IP 2 0\ne");
    }

    #[test]
    fn test_counter_past_counted_depths() {
        let mut backend = ManBackend::new();
        backend.set_list_depth(COUNTED_DEPTHS);
        let mut out = String::new();
        backend.block_item(Markup::OrderedList, "deep", &mut out);
        assert_eq!(out, ".IP x 15\ndeep");
    }

    #[test]
    fn test_titles() {
        let mut backend = ManBackend::new();
        let mut out = String::new();
        backend.block_start(Markup::TitleLevel2, "Name", &mut out);
        assert_eq!(out, ".SH ");

        out.clear();
        backend.block_start(Markup::NumberedTitleLevel1, "Intro", &mut out);
        assert_eq!(out, ".TH 1. ");
    }

    #[test]
    fn test_table() {
        let mut backend = ManBackend::new();
        let mut out = String::new();
        backend.table_start(Markup::TableHeader, true, false, &mut out);

        let mut first = TableCell::new("A", TextAlign::Left, true);
        first.colspan = 2;
        let header = [first, TableCell::spanned(), TableCell::new("B", TextAlign::Right, true)];
        backend.table_row(Markup::TableHeader, &header, &mut out);
        assert_eq!(out, ".TS\nallbox, tab(^); lsr.\n \\fBA\\fR^\\fBB\\fR");

        out.clear();
        let row = [
            TableCell::new("1", TextAlign::Left, true),
            TableCell::new("2", TextAlign::Center, true),
        ];
        backend.table_row(Markup::Table, &row, &mut out);
        backend.block_end(Markup::Table, &mut out);
        assert_eq!(out, " 1^2.TE\n");
    }

    #[test]
    fn test_links() {
        let backend = ManBackend::new();
        let mut out = String::new();
        backend.link(
            &ImageLink::new("http://x.org", TextAlign::Left).with_label("site"),
            &mut out,
        );
        assert_eq!(out, "site (http://x.org)");

        out.clear();
        backend.link(
            &ImageLink::new("http://x.org", TextAlign::Left).with_label("logo.png"),
            &mut out,
        );
        assert_eq!(out, "(logo.png) (http://x.org)");
    }
}
