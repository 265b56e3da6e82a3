//! Beautifiers: inline text decorations delimited by doubled characters.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static SOFT_LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\$").unwrap());

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)\*\*([^\s](?:.*?[^\s])??\**)\*\*").unwrap());

// URL scheme slashes are masked before matching, see `searchable`.
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)//([^\s](?:.*?[^\s])??/*)//").unwrap());

static UNDERLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)__([^\s_](?:.*?[^\s_])??_*)__").unwrap());

static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)--([^\s](?:.*?[^\s])??-*)--").unwrap());

static MONOSPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)``([^\s](?:.*?[^\s])??`*)``").unwrap());

/// Byte that stands in for a masked `/` while searching for italics.
const MASK: &str = "\u{1}\u{1}";

/// An inline decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Beautifier {
    SoftLineBreak,
    Bold,
    Italic,
    Underline,
    Strike,
    Monospace,
}

impl Beautifier {
    /// All beautifiers in substitution order.
    pub const ALL: [Self; 6] = [
        Self::SoftLineBreak,
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strike,
        Self::Monospace,
    ];

    /// Source delimiter.
    #[must_use]
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::SoftLineBreak => "\\",
            Self::Bold => "**",
            Self::Italic => "//",
            Self::Underline => "__",
            Self::Strike => "--",
            Self::Monospace => "``",
        }
    }

    /// Whether the decoration has a closing delimiter.
    fn is_paired(self) -> bool {
        !matches!(self, Self::SoftLineBreak)
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::SoftLineBreak => &SOFT_LINE_BREAK_RE,
            Self::Bold => &BOLD_RE,
            Self::Italic => &ITALIC_RE,
            Self::Underline => &UNDERLINE_RE,
            Self::Strike => &STRIKE_RE,
            Self::Monospace => &MONOSPACE_RE,
        }
    }

    /// Text the pattern runs against; byte offsets match `line`.
    ///
    /// The `//` of an `http://` or `https://` scheme can never close an
    /// italic span, so it is masked out.
    fn searchable(self, line: &str) -> Cow<'_, str> {
        if self != Self::Italic || !line.contains("://") {
            return Cow::Borrowed(line);
        }

        let lower = line.to_ascii_lowercase();
        let mut masked = line.to_owned();
        for scheme in ["http://", "https://"] {
            for (idx, _) in lower.match_indices(scheme) {
                let slashes = idx + scheme.len() - 2;
                masked.replace_range(slashes..slashes + 2, MASK);
            }
        }
        Cow::Owned(masked)
    }

    /// Replace every occurrence of this decoration in `line` with the target
    /// tags.
    ///
    /// Spans lying inside a `[...]` bracket belong to an image or link and
    /// are left alone. Scanning resumes after each inserted tag, so output is
    /// never matched twice.
    #[must_use]
    pub fn apply(self, line: &str, start_tag: &str, end_tag: &str) -> String {
        let delimiter = self.delimiter().len();
        let mut out = line.to_owned();
        let mut pos = 0;

        while pos < out.len() {
            let found = {
                let haystack = self.searchable(&out);
                self.pattern().captures_at(&haystack, pos).and_then(|caps| {
                    let whole = caps.get(0)?;
                    let start = caps.get(1).map_or(whole.start(), |lead| lead.end());
                    Some((start, whole.end()))
                })
            };
            let Some((start, end)) = found else {
                break;
            };

            if let Some(bracket_end) = enclosing_bracket(&out, start, end) {
                pos = bracket_end;
                continue;
            }

            let mut replaced = String::with_capacity(out.len() + start_tag.len() + end_tag.len());
            replaced.push_str(&out[..start]);
            replaced.push_str(start_tag);
            if self.is_paired() {
                replaced.push_str(&out[start + delimiter..end - delimiter]);
                replaced.push_str(end_tag);
            }
            pos = replaced.len();
            replaced.push_str(&out[end..]);
            out = replaced;
        }

        out
    }
}

/// End offset (past the `]`) of the outermost bracket pair enclosing
/// `start..end`, if any.
fn enclosing_bracket(line: &str, start: usize, end: usize) -> Option<usize> {
    let mut opens = Vec::new();
    let mut enclosing = None;
    for (idx, byte) in line.bytes().enumerate() {
        match byte {
            b'[' => opens.push(idx),
            b']' => {
                if let Some(open) = opens.pop()
                    && open < start
                    && end <= idx
                {
                    enclosing = Some(idx + 1);
                }
            }
            _ => {}
        }
    }
    enclosing
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bold() {
        assert_eq!(
            Beautifier::Bold.apply("**bold** and **more**", "<b>", "</b>"),
            "<b>bold</b> and <b>more</b>"
        );
    }

    #[test]
    fn test_requires_leading_whitespace() {
        assert_eq!(Beautifier::Bold.apply("x**bold**", "<b>", "</b>"), "x**bold**");
    }

    #[test]
    fn test_inner_space_rejected() {
        assert_eq!(Beautifier::Bold.apply("** bold**", "<b>", "</b>"), "** bold**");
    }

    #[test]
    fn test_single_character() {
        assert_eq!(Beautifier::Monospace.apply("``x``", "<code>", "</code>"), "<code>x</code>");
    }

    #[test]
    fn test_tab_before_delimiter() {
        assert_eq!(Beautifier::Underline.apply("a\t__u__", "<u>", "</u>"), "a\t<u>u</u>");
    }

    #[test]
    fn test_italic_skips_url_scheme() {
        assert_eq!(
            Beautifier::Italic.apply("//see http://example.com//", "<i>", "</i>"),
            "<i>see http://example.com</i>"
        );
    }

    #[test]
    fn test_italic_ignores_bare_url() {
        assert_eq!(
            Beautifier::Italic.apply("go to https://example.com now", "<i>", "</i>"),
            "go to https://example.com now"
        );
    }

    #[test]
    fn test_soft_line_break() {
        assert_eq!(
            Beautifier::SoftLineBreak.apply("first half\\", "<br>", ""),
            "first half<br>"
        );
        assert_eq!(
            Beautifier::SoftLineBreak.apply("a \\ b", "<br>", ""),
            "a \\ b"
        );
    }

    #[test]
    fn test_empty_target_tags_drop_delimiters() {
        assert_eq!(Beautifier::Strike.apply("--gone--", "", ""), "gone");
    }

    #[test]
    fn test_skips_span_inside_brackets() {
        assert_eq!(
            Beautifier::Bold.apply("[label **b** http://x.org] **c**", "<b>", "</b>"),
            "[label **b** http://x.org] <b>c</b>"
        );
    }

    #[test]
    fn test_substitutes_outside_brackets() {
        assert_eq!(
            Beautifier::Bold.apply("**bold** [x.png]", "<b>", "</b>"),
            "<b>bold</b> [x.png]"
        );
    }

    #[test]
    fn test_enclosing_bracket_picks_outermost() {
        let line = "[[a.png] x **b** y]";
        assert_eq!(enclosing_bracket(line, 10, 16), Some(line.len()));
        assert_eq!(enclosing_bracket(line, 0, 3), None);
    }
}
