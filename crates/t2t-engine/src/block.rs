//! Processing routines for the non-list, non-table blocks.

use crate::backend::TargetBackend;
use crate::inline;
use crate::markup::{self, Markup};
use crate::status::ProcessStatus;

/// Run inline substitution when the block allows it.
pub(crate) fn inline_text<B: TargetBackend>(markup: Markup, text: &str, backend: &B) -> String {
    if markup.runs_beautifiers() {
        inline::substitute(text, backend)
    } else {
        text.to_owned()
    }
}

/// "``` code": a single preformatted line.
pub(crate) fn process_verbatim_line<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    let text = line.strip_prefix(markup.start_tag()).unwrap_or(line);
    backend.block_start(markup, text, &mut status.output);
    status.mode = None;
    status.reprocess = false;
}

/// Verbatim, raw and tagged areas. Inner lines are never substituted.
pub(crate) fn process_area<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    let marker = line.trim() == markup.start_tag();

    if marker && !status.continuation {
        backend.block_start(markup, line, &mut status.output);
        status.mode = Some(markup);
    } else if marker {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
    } else {
        backend.block_item(markup, line, &mut status.output);
        status.mode = Some(markup);
    }
    status.reprocess = false;
}

pub(crate) fn process_separator<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    backend.block_start(markup, line, &mut status.output);
    status.mode = None;
    status.reprocess = false;
}

/// Titles and numbered titles. The inner text is substituted, then wrapped.
pub(crate) fn process_title<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    let (start, end) = (markup.start_tag().len(), markup.end_tag().len());
    let inner = line.get(start..line.len() - end).unwrap_or_default();
    let text = inline_text(markup, inner, backend);

    backend.block_start(markup, &text, &mut status.output);
    status.output.push_str(&text);
    backend.block_end(markup, &mut status.output);

    status.mode = None;
    status.reprocess = false;
}

/// "%%%" regions are swallowed until the closing marker.
pub(crate) fn process_todo_block(markup: Markup, line: &str, status: &mut ProcessStatus) {
    if status.continuation && line.trim() == markup.end_tag() {
        status.mode = None;
    } else {
        status.mode = Some(markup);
    }
    status.reprocess = false;
}

/// "% note" lines produce no output.
pub(crate) fn process_todo(status: &mut ProcessStatus) {
    status.mode = None;
    status.reprocess = false;
}

/// Tab-indented paragraph.
pub(crate) fn process_quoted_paragraph<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    if !status.continuation {
        let text = inline_text(markup, line.trim(), backend);
        backend.block_start(markup, &text, &mut status.output);
        status.mode = Some(markup);
        status.reprocess = false;
    } else if markup::is_blank(line) {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        status.reprocess = false;
        status.count_nested_blank();
    } else if Markup::from_start_tag(line).is_some() || !line.starts_with(markup.start_tag()) {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        status.reprocess = true;
    } else {
        let text = inline_text(markup, line.trim(), backend);
        backend.block_item(markup, &text, &mut status.output);
        status.reprocess = false;
    }
}

/// Plain paragraph; closes on a blank line or on a line opening another
/// block.
pub(crate) fn process_paragraph<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    if !status.continuation {
        let text = inline_text(markup, line, backend);
        backend.block_start(markup, &text, &mut status.output);
        status.mode = Some(markup);
        status.reprocess = false;
    } else if markup::is_blank(line) {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        status.reprocess = false;
        status.count_nested_blank();
    } else if (Markup::from_start_tag(line).is_some() || markup::block_opener(line).is_some())
        && Markup::recognize(line) != Some(Markup::Paragraph)
    {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        status.reprocess = true;
    } else {
        let text = inline_text(markup, line, backend);
        backend.block_item(markup, &text, &mut status.output);
        status.reprocess = false;
    }
}
