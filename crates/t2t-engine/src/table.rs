//! Table rows: cell splitting, column spans and alignment.

use crate::backend::TargetBackend;
use crate::block::inline_text;
use crate::list::leading_spaces;
use crate::markup::{self, Markup};
use crate::status::ProcessStatus;
use crate::types::{TableCell, TextAlign};

/// Cell delimiter.
const DELIMITER: char = '|';

pub(crate) fn process_table<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    status.blank_line_count = 0;

    if !status.continuation {
        let centered = leading_spaces(line) > status.current_indent();
        backend.table_start(markup, status.table_border, centered, &mut status.output);
        render_row(markup, line, status, backend);
        status.mode = Some(markup);
        status.reprocess = false;
        return;
    }

    let toggled = match markup {
        Markup::TableHeader if Markup::Table.matches(line) => Some(Markup::Table),
        Markup::Table if Markup::TableHeader.matches(line) => Some(Markup::TableHeader),
        _ => None,
    };

    if let Some(other) = toggled {
        tracing::trace!(from = ?markup, to = ?other, "Table row kind switched");
        status.mode = Some(other);
        status.reprocess = true;
    } else if line.trim() == markup.end_tag() {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        status.reprocess = false;
    } else if !line.trim().starts_with(markup.start_tag()) {
        backend.block_end(markup, &mut status.output);
        status.mode = None;
        status.reprocess = !markup::is_blank(line);
        if !status.reprocess {
            status.count_nested_blank();
        }
    } else {
        render_row(markup, line, status, backend);
        status.reprocess = false;
    }
}

fn render_row<B: TargetBackend>(
    markup: Markup,
    line: &str,
    status: &mut ProcessStatus,
    backend: &mut B,
) {
    let cells = build_cells(markup, line, status.table_border, backend);
    backend.table_row(markup, &cells, &mut status.output);
}

/// Split a row into raw cell contents, dropping the outer delimiters.
pub(crate) fn split_row(row: &str) -> Vec<&str> {
    let row = row.trim();
    let body = row
        .strip_prefix("||")
        .or_else(|| row.strip_prefix(DELIMITER))
        .unwrap_or(row);
    let body = body.strip_suffix(DELIMITER).unwrap_or(body);

    if body.is_empty() {
        return Vec::new();
    }
    body.split(DELIMITER).collect()
}

/// Alignment from the spaces around a cell's text.
fn cell_align(content: &str) -> TextAlign {
    let left = content.len() - content.trim_start_matches(' ').len();
    let right = content.len() - content.trim_end_matches(' ').len();

    if left == right && left > 0 {
        TextAlign::Center
    } else if left > right {
        TextAlign::Right
    } else {
        TextAlign::Left
    }
}

/// Build the cells of one row.
///
/// An empty cell after the first column extends the span of the nearest
/// visible cell before it and is kept as a [`TableCell::spanned`]
/// placeholder.
pub(crate) fn build_cells<B: TargetBackend>(
    markup: Markup,
    line: &str,
    has_border: bool,
    backend: &B,
) -> Vec<TableCell> {
    let mut cells: Vec<TableCell> = Vec::new();

    for (idx, raw) in split_row(line).into_iter().enumerate() {
        let content = raw.strip_prefix(' ').unwrap_or(raw);
        let content = content.strip_suffix(' ').unwrap_or(content);

        if content.is_empty() && idx > 0 {
            if let Some(owner) = cells.iter_mut().rev().find(|cell| cell.text.is_some()) {
                owner.colspan += 1;
            }
            cells.push(TableCell::spanned());
            continue;
        }

        let text = inline_text(markup, content.trim(), backend);
        cells.push(TableCell::new(text, cell_align(content), has_border));
    }

    cells
}
