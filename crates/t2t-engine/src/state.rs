//! Shared state and helpers for the target backends.

use std::borrow::Cow;

/// Auto-incrementing counters for numbered titles.
#[derive(Debug, Default, Clone)]
pub struct TitleCounters {
    counters: [usize; 3],
}

impl TitleCounters {
    /// Create counters starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `level` (0-2), reset deeper levels and format the result.
    ///
    /// Returns e.g. `"1. "` or `"2.1. "`; an out-of-range level yields an
    /// empty string.
    pub fn next(&mut self, level: usize) -> String {
        let Some(counter) = self.counters.get_mut(level) else {
            return String::new();
        };
        *counter += 1;
        for deeper in self.counters.iter_mut().skip(level + 1) {
            *deeper = 0;
        }

        let mut out = self.counters[..=level]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        out.push_str(". ");
        out
    }
}

/// Escape HTML special characters, borrowing when nothing needs escaping.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_counters() {
        let mut titles = TitleCounters::new();
        assert_eq!(titles.next(0), "1. ");
        assert_eq!(titles.next(1), "1.1. ");
        assert_eq!(titles.next(1), "1.2. ");
        assert_eq!(titles.next(2), "1.2.1. ");
        assert_eq!(titles.next(0), "2. ");
        assert_eq!(titles.next(2), "2.0.1. ");
    }

    #[test]
    fn test_title_counters_out_of_range() {
        let mut titles = TitleCounters::new();
        assert_eq!(titles.next(3), "");
        assert_eq!(titles.next(0), "1. ");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
        assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#x27;s");
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }
}
