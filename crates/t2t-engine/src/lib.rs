//! Line-oriented txt2tags conversion engine with pluggable target backends.
//!
//! This crate converts a subset of txt2tags markup into HTML, `man(7)`
//! macros or `MediaWiki` markup, one source line at a time.
//!
//! # Architecture
//!
//! - [`Markup`] is the closed registry of block constructs. Each variant
//!   knows its tags, how to recognize an opening line and how to process a
//!   line while it is the current mode.
//! - [`ProcessStatus`] carries the per-document state: current mode, the
//!   depth stack of interrupted list levels, blank line counts and the
//!   reprocess flag.
//! - The inline engine ([`inline`]) rewrites beautifiers, images and links
//!   inside a line.
//! - [`TargetBackend`] maps abstract block, beautifier, image and link
//!   operations to output syntax:
//!   - [`HtmlBackend`]: HTML fragments
//!   - [`ManBackend`]: `man(7)` with `tbl(1)` tables
//!   - [`WikiBackend`]: `MediaWiki` markup
//! - [`LineProcessor`] drives a document through the state machine.
//!
//! # Example
//!
//! ```
//! use t2t_engine::{HtmlBackend, LineProcessor};
//!
//! let mut processor = LineProcessor::new(HtmlBackend::new());
//! let output = processor.process_lines(["- one", "- two"]);
//! assert_eq!(output, ["<ul>\n<li>one", "</li>\n<li>two", "</li>\n</ul>\n"]);
//! ```

mod backend;
mod block;
mod html;
pub mod inline;
mod list;
mod man;
mod markup;
mod processor;
mod state;
mod status;
mod table;
mod types;
mod util;
mod wiki;

pub use backend::TargetBackend;
pub use html::HtmlBackend;
pub use inline::{Beautifier, IMAGE_EXTENSIONS, is_image, try_parse_url};
pub use man::ManBackend;
pub use markup::Markup;
pub use processor::LineProcessor;
pub use state::{TitleCounters, escape_html};
pub use status::{DepthEntry, ProcessStatus};
pub use types::{ImageLink, TableCell, TextAlign};
pub use util::{to_lower_alpha, to_roman};
pub use wiki::WikiBackend;
