//! Indentation-driven list processing.
//!
//! Unordered and ordered lists nest by indentation. A line indented past the
//! cumulative indent of the open levels pushes the current list onto the
//! depth stack and is reprocessed as the first line of a nested block; a
//! line indented less closes the innermost level and is reprocessed one
//! level up. One blank line keeps a list open, the second closes every
//! level.

use crate::backend::TargetBackend;
use crate::block::inline_text;
use crate::markup::{self, Markup};
use crate::status::ProcessStatus;

/// Number of leading space characters.
pub(crate) fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|byte| *byte == b' ').count()
}

/// Whether `line` is nothing but the first character of the list marker.
fn is_close_marker(markup: Markup, line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() == 1 && markup.start_tag().starts_with(trimmed)
}

/// Item text with the marker removed and inline substitution applied.
fn item_text<B: TargetBackend>(markup: Markup, line: &str, backend: &B) -> String {
    let trimmed = line.trim();
    let text = trimmed.strip_prefix(markup.start_tag()).unwrap_or(trimmed);
    inline_text(markup, text, backend)
}

pub(crate) fn process_list<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    if !status.continuation {
        let text = item_text(markup, line, backend);
        backend.block_start(markup, &text, &mut status.output);
        status.mode = Some(markup);
        status.reprocess = false;
        status.blank_line_count = 0;
        return;
    }

    if markup::is_blank(line) {
        status.blank_line_count += 1;
        if status.blank_line_count > 1 {
            close_entire_list(markup, status, backend);
            status.blank_line_count = 0;
        }
        status.reprocess = false;
        return;
    }

    status.blank_line_count = 0;
    let leading = leading_spaces(line);
    let current = status.current_indent();

    if is_close_marker(markup, line) {
        backend.block_end(markup, &mut status.output);
        status.mode = status.pop_depth(backend);
        status.reprocess = false;
    } else if leading > current {
        status.push_depth(markup, leading - current, backend);
        status.mode = None;
        status.reprocess = true;
    } else if leading < current {
        backend.block_end(markup, &mut status.output);
        status.mode = status.pop_depth(backend);
        status.reprocess = true;
    } else if !line.trim().starts_with(markup.start_tag()) {
        close_entire_list(markup, status, backend);
        status.reprocess = true;
    } else {
        let text = item_text(markup, line, backend);
        backend.block_item(markup, &text, &mut status.output);
        status.mode = Some(markup);
        status.reprocess = false;
    }
}

/// Close `markup` and every level on the depth stack, innermost first.
fn close_entire_list<B: TargetBackend>(
    markup: Markup,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    backend.block_end(markup, &mut status.output);
    while let Some(parent) = status.pop_depth(backend) {
        backend.block_end(parent, &mut status.output);
    }
    status.mode = None;
}

/// Definition lists: `: term` lines followed by indented descriptions.
pub(crate) fn process_definition_list<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    status.reprocess = false;

    if !status.continuation {
        let text = item_text(markup, line, backend);
        backend.block_start(markup, &text, &mut status.output);
        status.mode = Some(markup);
    } else if markup::is_blank(line) || is_close_marker(markup, line) {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        if markup::is_blank(line) {
            status.count_nested_blank();
        }
    } else if line.starts_with(markup.start_tag()) {
        let text = item_text(markup, line, backend);
        backend.block_item(markup, &text, &mut status.output);
    } else if leading_spaces(line) == 0 && !line.starts_with('\t') {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        status.reprocess = true;
    } else {
        let text = inline_text(markup, line.trim(), backend);
        backend.describe_term(&text, &mut status.output);
    }
}
