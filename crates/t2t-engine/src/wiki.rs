//! `MediaWiki` backend.

use std::fmt::Write;

use crate::backend::TargetBackend;
use crate::inline::Beautifier;
use crate::markup::Markup;
use crate::state::TitleCounters;
use crate::types::{ImageLink, TableCell};

const IMAGE_START: &str = "[[Image:";
const IMAGE_END: &str = "]]";

/// `MediaWiki` render backend.
#[derive(Debug, Default)]
pub struct WikiBackend {
    titles: TitleCounters,
    list_depth: usize,
}

impl WikiBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn list_item(&self, markup: Markup, text: &str, out: &mut String) {
        let bullet = if markup == Markup::OrderedList { "#" } else { "*" };
        write!(out, "{} {text}", bullet.repeat(self.list_depth + 1)).unwrap();
    }
}

/// Heading delimiter for a title variant.
fn heading(markup: Markup) -> &'static str {
    match markup.title_level() {
        Some(0) => "=",
        Some(1) => "==",
        _ => "===",
    }
}

/// Cell delimiters: the row opener and the separator between cells.
fn cell_delimiters(markup: Markup) -> (&'static str, &'static str) {
    if markup == Markup::TableHeader {
        ("!", "!!")
    } else {
        ("|", "||")
    }
}

impl TargetBackend for WikiBackend {
    const NAME: &'static str = "wiki";

    fn block_start(&mut self, markup: Markup, text: &str, out: &mut String) {
        match markup {
            Markup::VerbatimLine => write!(out, "<pre>\n{text}\n</pre>").unwrap(),
            Markup::VerbatimArea => out.push_str("<pre>"),
            Markup::Separator | Markup::BoldSeparator => out.push_str("----"),
            Markup::TitleLevel1 | Markup::TitleLevel2 | Markup::TitleLevel3 => {
                write!(out, "{} ", heading(markup)).unwrap();
            }
            Markup::NumberedTitleLevel1 | Markup::NumberedTitleLevel2 | Markup::NumberedTitleLevel3 => {
                let counter = markup
                    .title_level()
                    .map(|level| self.titles.next(level))
                    .unwrap_or_default();
                write!(out, "{} {counter}", heading(markup)).unwrap();
            }
            Markup::UnorderedList | Markup::OrderedList => self.list_item(markup, text, out),
            Markup::DefinitionList => write!(out, "; {text}").unwrap(),
            Markup::QuotedParagraph => write!(out, "<blockquote>\n    {text}").unwrap(),
            Markup::Paragraph => out.push_str(text),
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
            Markup::DefinitionList => write!(out, "; {text}").unwrap(),
            Markup::QuotedParagraph => write!(out, "    {text}").unwrap(),
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
            | Markup::NumberedTitleLevel3 => write!(out, " {}", heading(markup)).unwrap(),
            Markup::Table | Markup::TableHeader => out.push_str("|}\n"),
            Markup::QuotedParagraph => out.push_str("</blockquote>\n"),
            _ => {}
        }
    }

    fn describe_term(&mut self, text: &str, out: &mut String) {
        write!(out, ": {text}").unwrap();
    }

    fn table_start(&mut self, _markup: Markup, has_border: bool, centered: bool, out: &mut String) {
        out.push_str("{| cellpadding=\"4\" ");
        if has_border {
            out.push_str("border=\"1\" ");
        }
        if centered {
            out.push_str("align=\"center\" ");
        }
        out.push('\n');
    }

    fn table_row(&mut self, markup: Markup, cells: &[TableCell], out: &mut String) {
        let (opener, separator) = cell_delimiters(markup);
        write!(out, "|-\n{opener}").unwrap();

        let mut first = true;
        for cell in cells {
            let Some(text) = &cell.text else {
                continue;
            };
            if !first {
                out.push_str(separator);
            }
            first = false;
            if cell.colspan > 1 {
                write!(out, " colspan=\"{}\" |", cell.colspan).unwrap();
            }
            write!(out, " {text} ").unwrap();
        }
    }

    fn beautifier_tags(&self, kind: Beautifier) -> (&'static str, &'static str) {
        match kind {
            Beautifier::SoftLineBreak => ("\\\\", ""),
            Beautifier::Bold => ("'''", "'''"),
            Beautifier::Italic => ("''", "''"),
            Beautifier::Underline => ("<u>", "</u>"),
            Beautifier::Strike => ("<s>", "</s>"),
            Beautifier::Monospace => ("<code>", "</code>"),
        }
    }

    fn image(&self, image: &ImageLink, out: &mut String) {
        write!(out, "{IMAGE_START}{}{IMAGE_END}", image.path).unwrap();
    }

    fn link(&self, link: &ImageLink, out: &mut String) {
        let image = link
            .label
            .strip_prefix(IMAGE_START)
            .and_then(|rest| rest.strip_suffix(IMAGE_END));

        match image {
            Some(path) => write!(out, "[{} ({path})]", link.path).unwrap(),
            None if link.label.is_empty() => write!(out, "[{}]", link.path).unwrap(),
            None => write!(out, "[{} {}]", link.path, link.label).unwrap(),
        }
    }

    fn already_rendered(&self, candidate: &str) -> bool {
        candidate.starts_with(IMAGE_START) || candidate.ends_with(")]")
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
    fn test_list_prefix_follows_depth() {
        let mut backend = WikiBackend::new();
        let mut out = String::new();
        backend.block_start(Markup::UnorderedList, "a", &mut out);
        assert_eq!(out, "* a");

        backend.set_list_depth(2);
        out.clear();
        backend.block_item(Markup::OrderedList, "b", &mut out);
        assert_eq!(out, "### b");
    }

    #[test]
    fn test_titles() {
        let mut backend = WikiBackend::new();
        let mut out = String::new();
        backend.block_start(Markup::NumberedTitleLevel2, "T", &mut out);
        out.push('T');
        backend.block_end(Markup::NumberedTitleLevel2, &mut out);
        assert_eq!(out, "== 0.1. T ==");
    }

    #[test]
    fn test_definition_list() {
        let mut backend = WikiBackend::new();
        let mut out = String::new();
        backend.block_start(Markup::DefinitionList, "term", &mut out);
        out.push('|');
        backend.describe_term("meaning", &mut out);
        assert_eq!(out, "; term|: meaning");
    }

    #[test]
    fn test_table() {
        let mut backend = WikiBackend::new();
        let mut out = String::new();
        backend.table_start(Markup::Table, true, true, &mut out);
        assert_eq!(out, "{| cellpadding=\"4\" border=\"1\" align=\"center\" \n");

        let mut first = TableCell::new("A", TextAlign::Left, true);
        first.colspan = 2;
        let cells = [first, TableCell::spanned(), TableCell::new("B", TextAlign::Left, true)];
        out.clear();
        backend.table_row(Markup::Table, &cells, &mut out);
        assert_eq!(out, "|-\n| colspan=\"2\" | A || B ");

        out.clear();
        backend.table_row(Markup::TableHeader, &[TableCell::new("H", TextAlign::Left, false)], &mut out);
        assert_eq!(out, "|-\n! H ");
    }

    #[test]
    fn test_links() {
        let backend = WikiBackend::new();
        let mut image = String::new();
        backend.image(&ImageLink::new("logo.png", TextAlign::Left), &mut image);
        assert_eq!(image, "[[Image:logo.png]]");

        let mut out = String::new();
        backend.link(
            &ImageLink::new("http://x.org", TextAlign::Left).with_label(image),
            &mut out,
        );
        assert_eq!(out, "[http://x.org (logo.png)]");
        assert!(backend.already_rendered(&out));

        out.clear();
        backend.link(&ImageLink::new("http://x.org", TextAlign::Left), &mut out);
        assert_eq!(out, "[http://x.org]");
    }
}
