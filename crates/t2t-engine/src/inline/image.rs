//! Bracketed image references: `[path/to/picture.png]`.

use std::sync::LazyLock;

use regex::Regex;

use crate::backend::TargetBackend;
use crate::types::{ImageLink, TextAlign};

/// File extensions recognized as images.
pub const IMAGE_EXTENSIONS: [&str; 16] = [
    "apng", "png", "avif", "gif", "jpg", "jpeg", "jfif", "pjpeg", "pjp", "svg", "webp", "bmp",
    "ico", "cur", "tif", "tiff",
];

/// `[` not followed by another `[`, a non-whitespace run ending in an image
/// extension, then `]`.
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\[(?:[^\[\s]\S*)?\.(?:{})\]",
        IMAGE_EXTENSIONS.join("|")
    ))
    .unwrap()
});

/// Whether `path` ends in a known image extension.
#[must_use]
pub fn is_image(path: &str) -> bool {
    path.rsplit_once('.').is_some_and(|(_, ext)| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Replace every standalone image reference in `line`.
///
/// An image directly preceded by `[` is the image half of a linked image and
/// is left for the link pass.
pub(crate) fn substitute_images<B: TargetBackend>(line: &str, backend: &B) -> String {
    let mut out = line.to_owned();
    let mut pos = 0;

    while pos < out.len() {
        let Some(found) = IMAGE_RE.find_at(&out, pos) else {
            break;
        };
        let (start, end) = (found.start(), found.end());

        if out[..start].ends_with('[') {
            pos = end;
            continue;
        }

        let align = TextAlign::from_position(&out, start, end);
        let image = ImageLink::new(&out[start + 1..end - 1], align);
        let mut rendered = String::new();
        backend.image(&image, &mut rendered);

        out.replace_range(start..end, &rendered);
        pos = start + rendered.len();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_image() {
        assert!(is_image("logo.png"));
        assert!(is_image("photos/Cat.JPEG"));
        assert!(!is_image("notes.txt"));
        assert!(!is_image("png"));
    }

    #[test]
    fn test_alignment_follows_position() {
        let backend = HtmlBackend::new();
        assert_eq!(
            substitute_images("[a.png] text [b.gif] more [c.svg]", &backend),
            "<img src='a.png' style='text-align: left;' alt=''> text \
             <img src='b.gif' style='text-align: center;' alt=''> more \
             <img src='c.svg' style='text-align: right;' alt=''>"
        );
    }

    #[test]
    fn test_image_inside_link_is_skipped() {
        let backend = HtmlBackend::new();
        let line = "[[logo.png] http://example.com]";
        assert_eq!(substitute_images(line, &backend), line);
    }

    #[test]
    fn test_non_image_brackets_untouched() {
        let backend = HtmlBackend::new();
        let line = "see [notes.txt] and [a b.png]";
        assert_eq!(substitute_images(line, &backend), line);
    }
}
