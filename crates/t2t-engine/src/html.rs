//! HTML backend.
//!
//! Emits plain HTML fragments with inline styles for image alignment and
//! table borders. No document wrapper is produced.

use std::fmt::Write;

use crate::backend::TargetBackend;
use crate::inline::Beautifier;
use crate::markup::Markup;
use crate::state::{TitleCounters, escape_html};
use crate::types::{ImageLink, TableCell};

const BORDER_STYLE: &str = "border: 1px solid black;";
const CENTER_STYLE: &str = "margin-left: auto; margin-right: auto;";

/// HTML render backend.
#[derive(Debug, Default)]
pub struct HtmlBackend {
    titles: TitleCounters,
}

impl HtmlBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Element name for a heading or list variant.
fn element(markup: Markup) -> &'static str {
    match markup {
        Markup::TitleLevel1 | Markup::NumberedTitleLevel1 => "h1",
        Markup::TitleLevel2 | Markup::NumberedTitleLevel2 => "h2",
        Markup::TitleLevel3 | Markup::NumberedTitleLevel3 => "h3",
        Markup::OrderedList => "ol",
        Markup::TableHeader => "th",
        Markup::Table => "td",
        _ => "ul",
    }
}

impl TargetBackend for HtmlBackend {
    const NAME: &'static str = "html";

    fn block_start(&mut self, markup: Markup, text: &str, out: &mut String) {
        match markup {
            Markup::VerbatimLine => write!(out, "<pre>\n{}\n</pre>", escape_html(text)).unwrap(),
            Markup::VerbatimArea => out.push_str("<pre>"),
            Markup::Separator => out.push_str("<hr>"),
            Markup::BoldSeparator => out.push_str("<hr style='border-width: 2px;'>"),
            Markup::TitleLevel1 | Markup::TitleLevel2 | Markup::TitleLevel3 => {
                write!(out, "<{}>", element(markup)).unwrap();
            }
            Markup::NumberedTitleLevel1 | Markup::NumberedTitleLevel2 | Markup::NumberedTitleLevel3 => {
                let counter = markup
                    .title_level()
                    .map(|level| self.titles.next(level))
                    .unwrap_or_default();
                write!(out, "<{}>{counter}", element(markup)).unwrap();
            }
            Markup::UnorderedList | Markup::OrderedList => {
                write!(out, "<{}>\n<li>{text}", element(markup)).unwrap();
            }
            Markup::DefinitionList => write!(out, "<dl>\n<dt>{text}</dt><dd>").unwrap(),
            Markup::QuotedParagraph => write!(out, "<blockquote>\n{text}").unwrap(),
            Markup::Paragraph => write!(out, "<p>\n{text}").unwrap(),
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
            Markup::VerbatimArea | Markup::RawArea => out.push_str(&escape_html(text)),
            Markup::UnorderedList | Markup::OrderedList => {
                write!(out, "</li>\n<li>{text}").unwrap();
            }
            Markup::DefinitionList => write!(out, "</dd>\n<dt>{text}</dt><dd>").unwrap(),
            _ => out.push_str(text),
        }
    }

    fn block_end(&mut self, markup: Markup, out: &mut String) {
        match markup {
            Markup::VerbatimArea => out.push_str("</pre>"),
            Markup::TitleLevel1
            | Markup::TitleLevel2
            | Markup::TitleLevel3
            | Markup::NumberedTitleLevel1
            | Markup::NumberedTitleLevel2
            | Markup::NumberedTitleLevel3 => write!(out, "</{}>", element(markup)).unwrap(),
            Markup::UnorderedList | Markup::OrderedList => {
                write!(out, "</li>\n</{}>\n", element(markup)).unwrap();
            }
            Markup::DefinitionList => out.push_str("</dd>\n</dl>\n"),
            Markup::Table | Markup::TableHeader => out.push_str("</table>\n"),
            Markup::QuotedParagraph => out.push_str("</blockquote>\n"),
            Markup::Paragraph => out.push_str("</p>\n"),
            _ => {}
        }
    }

    fn table_start(&mut self, _markup: Markup, has_border: bool, centered: bool, out: &mut String) {
        if !has_border && !centered {
            out.push_str("<table>\n");
            return;
        }
        out.push_str("<table style='");
        if has_border {
            out.push_str(BORDER_STYLE);
        }
        if centered {
            out.push_str(CENTER_STYLE);
        }
        out.push_str("'>\n");
    }

    fn table_row(&mut self, markup: Markup, cells: &[TableCell], out: &mut String) {
        let tag = element(markup);
        out.push_str("<tr>\n");
        for cell in cells {
            let Some(text) = &cell.text else {
                continue;
            };
            write!(out, "<{tag}").unwrap();
            if cell.colspan > 1 {
                write!(out, " colspan='{}'", cell.colspan).unwrap();
            }
            write!(out, " style='text-align: {};", cell.align).unwrap();
            if cell.has_border {
                out.push_str(BORDER_STYLE);
            }
            writeln!(out, "'>{text}</{tag}>").unwrap();
        }
        out.push_str("</tr>");
    }

    fn beautifier_tags(&self, kind: Beautifier) -> (&'static str, &'static str) {
        match kind {
            Beautifier::SoftLineBreak => ("<br>", ""),
            Beautifier::Bold => ("<strong>", "</strong>"),
            Beautifier::Italic => ("<i>", "</i>"),
            Beautifier::Underline => ("<u>", "</u>"),
            Beautifier::Strike => ("<del>", "</del>"),
            Beautifier::Monospace => ("<code>", "</code>"),
        }
    }

    fn image(&self, image: &ImageLink, out: &mut String) {
        write!(
            out,
            "<img src='{}' style='text-align: {};' alt='{}'>",
            image.path, image.align, image.label
        )
        .unwrap();
    }

    fn link(&self, link: &ImageLink, out: &mut String) {
        let label = if link.label.is_empty() {
            &link.path
        } else {
            &link.label
        };
        write!(out, "<a href='{}'>{label}</a>", link.path).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextAlign;
    use pretty_assertions::assert_eq;

    fn start(backend: &mut HtmlBackend, markup: Markup, text: &str) -> String {
        let mut out = String::new();
        backend.block_start(markup, text, &mut out);
        out
    }

    fn end(backend: &mut HtmlBackend, markup: Markup) -> String {
        let mut out = String::new();
        backend.block_end(markup, &mut out);
        out
    }

    #[test]
    fn test_lists() {
        let mut backend = HtmlBackend::new();
        assert_eq!(start(&mut backend, Markup::UnorderedList, "a"), "<ul>\n<li>a");
        assert_eq!(start(&mut backend, Markup::OrderedList, "a"), "<ol>\n<li>a");
        assert_eq!(end(&mut backend, Markup::OrderedList), "</li>\n</ol>\n");
    }

    #[test]
    fn test_separators() {
        let mut backend = HtmlBackend::new();
        assert_eq!(start(&mut backend, Markup::Separator, "----"), "<hr>");
        assert_eq!(
            start(&mut backend, Markup::BoldSeparator, "===="),
            "<hr style='border-width: 2px;'>"
        );
    }

    #[test]
    fn test_raw_area_is_escaped() {
        let mut backend = HtmlBackend::new();
        let mut out = String::new();
        backend.block_item(Markup::RawArea, "<b>&</b>", &mut out);
        assert_eq!(out, "&lt;b&gt;&amp;&lt;/b&gt;");

        let mut out = String::new();
        backend.block_item(Markup::TaggedArea, "<b>&</b>", &mut out);
        assert_eq!(out, "<b>&</b>");
    }

    #[test]
    fn test_numbered_title_counter() {
        let mut backend = HtmlBackend::new();
        assert_eq!(start(&mut backend, Markup::NumberedTitleLevel1, "A"), "<h1>1. ");
        assert_eq!(start(&mut backend, Markup::NumberedTitleLevel3, "B"), "<h3>1.0.1. ");
        assert_eq!(start(&mut backend, Markup::TitleLevel1, "C"), "<h1>");
    }

    #[test]
    fn test_table_start() {
        let mut backend = HtmlBackend::new();
        let mut out = String::new();
        backend.table_start(Markup::Table, false, false, &mut out);
        assert_eq!(out, "<table>\n");

        let mut out = String::new();
        backend.table_start(Markup::Table, true, true, &mut out);
        assert_eq!(
            out,
            "<table style='border: 1px solid black;margin-left: auto; margin-right: auto;'>\n"
        );
    }

    #[test]
    fn test_table_row_with_colspan() {
        let mut backend = HtmlBackend::new();
        let mut first = TableCell::new("A", TextAlign::Left, false);
        first.colspan = 2;
        let cells = [first, TableCell::spanned(), TableCell::new("B", TextAlign::Center, true)];

        let mut out = String::new();
        backend.table_row(Markup::Table, &cells, &mut out);
        assert_eq!(
            out,
            "<tr>\n\
             <td colspan='2' style='text-align: left;'>A</td>\n\
             <td style='text-align: center;border: 1px solid black;'>B</td>\n\
             </tr>"
        );
    }

    #[test]
    fn test_header_cells() {
        let mut backend = HtmlBackend::new();
        let mut out = String::new();
        backend.table_row(
            Markup::TableHeader,
            &[TableCell::new("H", TextAlign::Right, false)],
            &mut out,
        );
        assert_eq!(out, "<tr>\n<th style='text-align: right;'>H</th>\n</tr>");
    }

    #[test]
    fn test_link_label() {
        let backend = HtmlBackend::new();
        let mut out = String::new();
        backend.link(&ImageLink::new("http://x.org", TextAlign::Left), &mut out);
        assert_eq!(out, "<a href='http://x.org'>http://x.org</a>");

        let mut out = String::new();
        backend.link(
            &ImageLink::new("http://x.org", TextAlign::Left).with_label("X"),
            &mut out,
        );
        assert_eq!(out, "<a href='http://x.org'>X</a>");
    }
}
