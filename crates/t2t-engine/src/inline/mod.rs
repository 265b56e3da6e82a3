//! Inline substitution engine.
//!
//! Rewrites the interior of a single line in a fixed order: every
//! [`Beautifier`], then images, then links.

mod beautifier;
mod image;
mod link;

pub use beautifier::Beautifier;
pub use image::{IMAGE_EXTENSIONS, is_image};
pub use link::try_parse_url;

use crate::backend::TargetBackend;

/// Apply all inline substitutions to `line`.
pub fn substitute<B: TargetBackend>(line: &str, backend: &B) -> String {
    let mut out = line.to_owned();
    for kind in Beautifier::ALL {
        let (start_tag, end_tag) = backend.beautifier_tags(kind);
        out = kind.apply(&out, start_tag, end_tag);
    }
    let out = image::substitute_images(&out, backend);
    link::substitute_links(&out, backend)
}
