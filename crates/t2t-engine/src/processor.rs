//! Line driver.
//!
//! [`LineProcessor`] feeds each source line through the block state machine,
//! re-running the same line while a pass asks for reprocessing, and flushes
//! whatever is still open when the document ends.

use crate::backend::TargetBackend;
use crate::status::ProcessStatus;

/// Reprocess passes allowed for one line beyond the open nesting depth.
const REPROCESS_SLACK: usize = 4;

/// Stateful converter for a single document.
///
/// # Example
///
/// ```
/// use t2t_engine::{HtmlBackend, LineProcessor};
///
/// let mut processor = LineProcessor::new(HtmlBackend::new());
/// assert_eq!(processor.process_line("**bold** text"), "<p>\n<strong>bold</strong> text");
/// assert_eq!(processor.close_document(), "</p>\n");
/// ```
#[derive(Debug)]
pub struct LineProcessor<B: TargetBackend> {
    status: ProcessStatus,
    backend: B,
}

impl<B: TargetBackend> LineProcessor<B> {
    /// Create a driver at top level rendering through `backend`.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            status: ProcessStatus::new(),
            backend,
        }
    }

    /// Current processing state.
    pub fn status(&self) -> &ProcessStatus {
        &self.status
    }

    /// Convert one source line, returning everything it produced.
    ///
    /// The result may hold several fragments when the line first closes one
    /// or more blocks and is then reprocessed under the block it opens.
    pub fn process_line(&mut self, line: &str) -> String {
        let mut output = String::new();
        let limit = self.status.depth.len() + REPROCESS_SLACK;
        let mut passes = 0;

        self.status.continuation = true;
        loop {
            if self.status.mode.is_none() && !self.status.resume_parent(&mut self.backend) {
                self.status.determine_mode(line);
                self.status.continuation = false;
            }
            let Some(mode) = self.status.mode else {
                self.status.reprocess = false;
                break;
            };

            tracing::trace!(
                target_format = B::NAME,
                ?mode,
                continuation = self.status.continuation,
                "Processing pass"
            );
            mode.process(line, &mut self.status, &mut self.backend);
            output.push_str(&self.status.take_output());

            if !self.status.reprocess {
                break;
            }
            passes += 1;
            if passes > limit {
                tracing::error!(line, passes, "Reprocess limit exceeded, moving to next line");
                self.status.reprocess = false;
                break;
            }
            tracing::debug!(?mode, next = ?self.status.mode, "Reprocessing line");
        }

        output
    }

    /// Close every block still open and return the flushed markup.
    ///
    /// Leaves the driver at top level, ready for another document.
    pub fn close_document(&mut self) -> String {
        let mut output = String::new();

        if let Some(mode) = self.status.mode {
            self.backend.block_end(mode, &mut output);
        }
        while let Some(parent) = self.status.pop_depth(&mut self.backend) {
            self.backend.block_end(parent, &mut output);
        }

        tracing::debug!(target_format = B::NAME, flushed = output.len(), "Document closed");
        self.status.reset();
        output
    }

    /// Convert `lines` in order, one output entry per line plus a final
    /// entry holding the close-document flush.
    pub fn process_lines<I>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut output: Vec<String> = lines
            .into_iter()
            .map(|line| self.process_line(line.as_ref()))
            .collect();
        output.push(self.close_document());
        output
    }

    /// Convert a whole document, newline-terminating each line's output.
    pub fn process_text(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len() * 2);
        for line in text.lines() {
            output.push_str(&self.process_line(line));
            if !output.ends_with('\n') {
                output.push('\n');
            }
        }
        output.push_str(&self.close_document());
        output
    }
}
