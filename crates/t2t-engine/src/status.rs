//! Per-document processing state.

use crate::backend::TargetBackend;
use crate::markup::{self, Markup};

/// One open nesting level on the depth stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthEntry {
    /// The enclosing block that was interrupted by a nested one.
    pub markup: Markup,
    /// Columns of indentation the nested level adds on top of its parent.
    pub indent: usize,
}

/// Mutable state threaded through every processing pass.
///
/// Owned by a single [`LineProcessor`](crate::LineProcessor); create a fresh
/// one per document.
#[derive(Debug, Default)]
pub struct ProcessStatus {
    pub(crate) mode: Option<Markup>,
    pub(crate) output: String,
    pub(crate) reprocess: bool,
    pub(crate) depth: Vec<DepthEntry>,
    pub(crate) continuation: bool,
    pub(crate) blank_line_count: usize,
    pub(crate) table_border: bool,
    /// Set while a pushed level waits for its nested block to be resolved.
    entering_child: bool,
}

impl ProcessStatus {
    /// Create an empty status at top level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently open block, `None` at top level.
    pub fn mode(&self) -> Option<Markup> {
        self.mode
    }

    /// Open nesting levels, outermost first.
    pub fn depth(&self) -> &[DepthEntry] {
        &self.depth
    }

    /// Whether the current pass continues an already open block.
    pub fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// Consecutive blank lines seen inside the current list.
    pub fn blank_line_count(&self) -> usize {
        self.blank_line_count
    }

    /// Whether the open table was started with a trailing border delimiter.
    pub fn table_has_border(&self) -> bool {
        self.table_border
    }

    /// Sum of the indentation consumed by every open nesting level.
    pub fn current_indent(&self) -> usize {
        self.depth.iter().map(|entry| entry.indent).sum()
    }

    /// Resolve, switch or clear the current mode for `line`.
    pub fn determine_mode(&mut self, line: &str) {
        self.entering_child = false;

        if markup::is_blank(line) {
            if self.mode.is_some_and(|mode| !mode.end_tag_required()) {
                self.mode = None;
            }
        } else if let Some(mode) = self.mode {
            if line == mode.end_tag() {
                self.mode = None;
            } else if let Some(other) = Markup::from_start_tag(line) {
                self.mode = Some(other);
            } else if let Some(opener) = markup::block_opener(line) {
                self.mode = Some(opener);
            }
        } else {
            self.mode = Markup::recognize(line);
        }

        self.table_border = matches!(self.mode, Some(Markup::Table | Markup::TableHeader))
            && line.trim_end().ends_with('|');

        tracing::trace!(mode = ?self.mode, table_border = self.table_border, "Resolved mode");
    }

    /// Push `markup` as an interrupted level adding `indent` columns.
    pub fn push_depth<B: TargetBackend>(&mut self, markup: Markup, indent: usize, backend: &mut B) {
        self.depth.push(DepthEntry { markup, indent });
        self.entering_child = true;
        backend.set_list_depth(self.depth.len());
        tracing::debug!(?markup, indent, depth = self.depth.len(), "Nesting level opened");
    }

    /// Pop the innermost level; an empty stack yields `None`.
    pub fn pop_depth<B: TargetBackend>(&mut self, backend: &mut B) -> Option<Markup> {
        let entry = self.depth.pop();
        backend.set_list_depth(self.depth.len());
        if let Some(entry) = entry {
            tracing::debug!(markup = ?entry.markup, depth = self.depth.len(), "Nesting level closed");
        }
        entry.map(|entry| entry.markup)
    }

    /// Return to the enclosing level after a nested block closed.
    ///
    /// Only applies while no mode is open and the stack holds an interrupted
    /// level that is not waiting for its child to be resolved.
    pub(crate) fn resume_parent<B: TargetBackend>(&mut self, backend: &mut B) -> bool {
        if self.mode.is_some() || self.entering_child || self.depth.is_empty() {
            return false;
        }
        self.mode = self.pop_depth(backend);
        self.mode.is_some()
    }

    /// Count a blank line that closed a block nested inside a list toward
    /// the parent list, so the next blank closes every level.
    pub(crate) fn count_nested_blank(&mut self) {
        if !self.depth.is_empty() {
            self.blank_line_count += 1;
        }
    }

    /// Take the output accumulated by the last pass.
    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Return to top level, dropping all nesting state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;

    #[test]
    fn test_determine_mode_from_top_level() {
        let mut status = ProcessStatus::new();
        status.determine_mode("- item");
        assert_eq!(status.mode(), Some(Markup::UnorderedList));
    }

    #[test]
    fn test_determine_mode_blank_at_top_level() {
        let mut status = ProcessStatus::new();
        status.determine_mode("   ");
        assert_eq!(status.mode(), None);
    }

    #[test]
    fn test_determine_mode_blank_closes_optional_end_tag() {
        let mut status = ProcessStatus::new();
        status.mode = Some(Markup::Paragraph);
        status.determine_mode("");
        assert_eq!(status.mode(), None);
    }

    #[test]
    fn test_determine_mode_blank_keeps_required_end_tag() {
        let mut status = ProcessStatus::new();
        status.mode = Some(Markup::VerbatimArea);
        status.determine_mode("");
        assert_eq!(status.mode(), Some(Markup::VerbatimArea));
    }

    #[test]
    fn test_determine_mode_end_tag_closes() {
        let mut status = ProcessStatus::new();
        status.mode = Some(Markup::RawArea);
        status.determine_mode("\"\"\"");
        assert_eq!(status.mode(), None);
    }

    #[test]
    fn test_determine_mode_switches_on_start_tag() {
        let mut status = ProcessStatus::new();
        status.mode = Some(Markup::Paragraph);
        status.determine_mode("```");
        assert_eq!(status.mode(), Some(Markup::VerbatimArea));
    }

    #[test]
    fn test_determine_mode_switches_on_first_token() {
        let mut status = ProcessStatus::new();
        status.mode = Some(Markup::UnorderedList);
        status.determine_mode("+ second kind");
        assert_eq!(status.mode(), Some(Markup::OrderedList));
    }

    #[test]
    fn test_determine_mode_switches_on_separator() {
        let mut status = ProcessStatus::new();
        status.mode = Some(Markup::Paragraph);
        status.determine_mode(&"-".repeat(22));
        assert_eq!(status.mode(), Some(Markup::Separator));
    }

    #[test]
    fn test_table_border() {
        let mut status = ProcessStatus::new();
        status.determine_mode("| a | b |");
        assert!(status.table_has_border());

        let mut status = ProcessStatus::new();
        status.determine_mode("| a | b");
        assert!(!status.table_has_border());
    }

    #[test]
    fn test_depth_stack() {
        let mut backend = HtmlBackend::new();
        let mut status = ProcessStatus::new();
        status.push_depth(Markup::UnorderedList, 2, &mut backend);
        status.push_depth(Markup::OrderedList, 3, &mut backend);
        assert_eq!(status.current_indent(), 5);

        assert_eq!(status.pop_depth(&mut backend), Some(Markup::OrderedList));
        assert_eq!(status.current_indent(), 2);
        assert_eq!(status.pop_depth(&mut backend), Some(Markup::UnorderedList));
        assert_eq!(status.pop_depth(&mut backend), None);
        assert_eq!(status.current_indent(), 0);
    }

    #[test]
    fn test_resume_parent_waits_for_child() {
        let mut backend = HtmlBackend::new();
        let mut status = ProcessStatus::new();
        status.push_depth(Markup::UnorderedList, 2, &mut backend);
        assert!(!status.resume_parent(&mut backend));

        status.determine_mode("  plain");
        status.mode = None;
        assert!(status.resume_parent(&mut backend));
        assert_eq!(status.mode(), Some(Markup::UnorderedList));
        assert!(status.depth().is_empty());
    }
}
