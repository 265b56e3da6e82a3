//! Block markup registry.
//!
//! Every block construct the engine understands is a [`Markup`] variant
//! carrying its static tag metadata, a recognizer and a processing routine.
//! [`Markup::ALL`] fixes the priority order used when a line opens a new
//! block.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::backend::TargetBackend;
use crate::status::ProcessStatus;
use crate::{block, list, table};

/// Separator start tag: twenty dashes.
const SEPARATOR: &str = "--------------------";

/// Bold separator start tag: twenty equals signs.
const BOLD_SEPARATOR: &str = "====================";

/// Start tag lookup. Later entries of [`Markup::ALL`] win on collisions, so
/// `"+ "` resolves to [`Markup::OrderedList`].
static START_TAGS: LazyLock<HashMap<&'static str, Markup>> = LazyLock::new(|| {
    Markup::ALL
        .iter()
        .map(|markup| (markup.start_tag(), *markup))
        .collect()
});

/// A block-level markup construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Markup {
    VerbatimLine,
    VerbatimArea,
    RawArea,
    TaggedArea,
    Separator,
    BoldSeparator,
    TitleLevel1,
    TitleLevel2,
    TitleLevel3,
    NumberedTitleLevel1,
    NumberedTitleLevel2,
    NumberedTitleLevel3,
    ToDoBlock,
    ToDo,
    UnorderedList,
    OrderedList,
    DefinitionList,
    Table,
    TableHeader,
    QuotedParagraph,
    Paragraph,
}

impl Markup {
    /// All variants in recognition priority order.
    pub const ALL: [Self; 21] = [
        Self::VerbatimLine,
        Self::VerbatimArea,
        Self::RawArea,
        Self::TaggedArea,
        Self::Separator,
        Self::BoldSeparator,
        Self::TitleLevel1,
        Self::TitleLevel2,
        Self::TitleLevel3,
        Self::NumberedTitleLevel1,
        Self::NumberedTitleLevel2,
        Self::NumberedTitleLevel3,
        Self::ToDoBlock,
        Self::ToDo,
        Self::UnorderedList,
        Self::OrderedList,
        Self::DefinitionList,
        Self::Table,
        Self::TableHeader,
        Self::QuotedParagraph,
        Self::Paragraph,
    ];

    /// Source tag that opens this block.
    #[must_use]
    pub fn start_tag(self) -> &'static str {
        match self {
            Self::VerbatimLine => "``` ",
            Self::VerbatimArea => "```",
            Self::RawArea => "\"\"\"",
            Self::TaggedArea => "'''",
            Self::Separator => SEPARATOR,
            Self::BoldSeparator => BOLD_SEPARATOR,
            Self::TitleLevel1 => "= ",
            Self::TitleLevel2 => "== ",
            Self::TitleLevel3 => "=== ",
            Self::NumberedTitleLevel1 => "+ ",
            Self::NumberedTitleLevel2 => "++ ",
            Self::NumberedTitleLevel3 => "+++ ",
            Self::ToDoBlock => "%%%",
            Self::ToDo => "% ",
            Self::UnorderedList => "- ",
            Self::OrderedList => "+ ",
            Self::DefinitionList => ": ",
            Self::Table => "| ",
            Self::TableHeader => "|| ",
            Self::QuotedParagraph => "\t",
            Self::Paragraph => "",
        }
    }

    /// Source tag that closes this block.
    ///
    /// Areas and lists close on their own start tag.
    #[must_use]
    pub fn end_tag(self) -> &'static str {
        match self {
            Self::TitleLevel1 => " =",
            Self::TitleLevel2 => " ==",
            Self::TitleLevel3 => " ===",
            Self::NumberedTitleLevel1 => " +",
            Self::NumberedTitleLevel2 => " ++",
            Self::NumberedTitleLevel3 => " +++",
            Self::Table | Self::TableHeader => "|",
            Self::QuotedParagraph => "",
            Self::VerbatimLine | Self::Separator | Self::BoldSeparator | Self::ToDo => "\n",
            Self::VerbatimArea
            | Self::RawArea
            | Self::TaggedArea
            | Self::ToDoBlock
            | Self::UnorderedList
            | Self::OrderedList
            | Self::DefinitionList
            | Self::Paragraph => self.start_tag(),
        }
    }

    /// Whether text inside this block goes through inline substitution.
    #[must_use]
    pub fn runs_beautifiers(self) -> bool {
        !matches!(
            self,
            Self::VerbatimLine
                | Self::VerbatimArea
                | Self::RawArea
                | Self::TaggedArea
                | Self::Separator
                | Self::BoldSeparator
                | Self::ToDoBlock
                | Self::ToDo
        )
    }

    /// Whether a blank line leaves this block open.
    #[must_use]
    pub fn end_tag_required(self) -> bool {
        matches!(
            self,
            Self::VerbatimLine
                | Self::VerbatimArea
                | Self::RawArea
                | Self::TaggedArea
                | Self::TitleLevel1
                | Self::TitleLevel2
                | Self::TitleLevel3
                | Self::NumberedTitleLevel1
                | Self::NumberedTitleLevel2
                | Self::NumberedTitleLevel3
                | Self::TableHeader
        )
    }

    /// Whether the block always renders from a single source line.
    #[must_use]
    pub fn one_line_result(self) -> bool {
        matches!(
            self,
            Self::VerbatimLine
                | Self::Separator
                | Self::BoldSeparator
                | Self::TitleLevel1
                | Self::TitleLevel2
                | Self::TitleLevel3
                | Self::NumberedTitleLevel1
                | Self::NumberedTitleLevel2
                | Self::NumberedTitleLevel3
                | Self::ToDoBlock
                | Self::ToDo
                | Self::TableHeader
        )
    }

    /// Zero-based heading level for title variants.
    #[must_use]
    pub fn title_level(self) -> Option<usize> {
        match self {
            Self::TitleLevel1 | Self::NumberedTitleLevel1 => Some(0),
            Self::TitleLevel2 | Self::NumberedTitleLevel2 => Some(1),
            Self::TitleLevel3 | Self::NumberedTitleLevel3 => Some(2),
            _ => None,
        }
    }

    /// Whether this is a numbered title variant.
    #[must_use]
    pub fn is_numbered_title(self) -> bool {
        matches!(
            self,
            Self::NumberedTitleLevel1 | Self::NumberedTitleLevel2 | Self::NumberedTitleLevel3
        )
    }

    /// Whether `line` opens a block of this kind.
    #[must_use]
    pub fn matches(self, line: &str) -> bool {
        let start = self.start_tag();
        match self {
            Self::VerbatimLine | Self::ToDo | Self::QuotedParagraph | Self::DefinitionList => {
                line.starts_with(start)
            }
            Self::VerbatimArea | Self::RawArea | Self::TaggedArea | Self::ToDoBlock => {
                line.trim() == start
            }
            Self::Separator | Self::BoldSeparator => line.starts_with(start),
            Self::TitleLevel1
            | Self::TitleLevel2
            | Self::TitleLevel3
            | Self::NumberedTitleLevel1
            | Self::NumberedTitleLevel2
            | Self::NumberedTitleLevel3 => {
                let end = self.end_tag();
                line.len() >= start.len() + end.len()
                    && line.starts_with(start)
                    && line.ends_with(end)
            }
            Self::UnorderedList | Self::OrderedList | Self::Table | Self::TableHeader => {
                line.trim().starts_with(start)
            }
            Self::Paragraph => !is_blank(line),
        }
    }

    /// Look up the variant registered for an exact start tag.
    #[must_use]
    pub fn from_start_tag(tag: &str) -> Option<Self> {
        START_TAGS.get(tag).copied()
    }

    /// First variant, in priority order, that recognizes `line`.
    #[must_use]
    pub fn recognize(line: &str) -> Option<Self> {
        if is_blank(line) {
            return None;
        }
        Self::ALL.into_iter().find(|markup| markup.matches(line))
    }

    /// Run this variant's block algorithm for one pass over `line`.
    pub(crate) fn process<B: TargetBackend>(
        self,
        line: &str,
        status: &mut ProcessStatus,
        backend: &mut B,
    ) {
        match self {
            Self::VerbatimLine => block::process_verbatim_line(self, line, status, backend),
            Self::VerbatimArea | Self::RawArea | Self::TaggedArea => {
                block::process_area(self, line, status, backend);
            }
            Self::Separator | Self::BoldSeparator => {
                block::process_separator(self, line, status, backend);
            }
            Self::TitleLevel1
            | Self::TitleLevel2
            | Self::TitleLevel3
            | Self::NumberedTitleLevel1
            | Self::NumberedTitleLevel2
            | Self::NumberedTitleLevel3 => block::process_title(self, line, status, backend),
            Self::ToDoBlock => block::process_todo_block(self, line, status),
            Self::ToDo => block::process_todo(status),
            Self::UnorderedList | Self::OrderedList => {
                list::process_list(self, line, status, backend);
            }
            Self::DefinitionList => list::process_definition_list(self, line, status, backend),
            Self::Table | Self::TableHeader => table::process_table(self, line, status, backend),
            Self::QuotedParagraph => block::process_quoted_paragraph(self, line, status, backend),
            Self::Paragraph => block::process_paragraph(self, line, status, backend),
        }
    }
}

/// Whether `line` is empty or whitespace only.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Variant that `line` would open when it interrupts another block.
///
/// Checks the first space-delimited token plus a trailing space against the
/// start tag table, or a single token against the separator tags.
pub(crate) fn block_opener(line: &str) -> Option<Markup> {
    match line.trim_end_matches(' ').split_once(' ') {
        Some((first, _)) => Markup::from_start_tag(&format!("{first} ")),
        None => [Markup::Separator, Markup::BoldSeparator]
            .into_iter()
            .find(|markup| line.starts_with(markup.start_tag())),
    }
}
