//! Links: linked images, bracketed named links and bare URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::image::IMAGE_EXTENSIONS;
use crate::backend::TargetBackend;
use crate::types::{ImageLink, TextAlign};

/// `[[picture.png] ... url]`
static IMAGE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\[\[\S*\.(?:{})\]\s.*?\]",
        IMAGE_EXTENSIONS.join("|")
    ))
    .unwrap()
});

/// `[label url]` or `[url]`
static NAMED_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\S.*?\]").unwrap());

/// Schemes accepted for bare URLs.
const URL_SCHEMES: [&str; 5] = ["http", "https", "ftp", "file", "mailto"];

/// Characters that cannot appear unescaped in a URI.
const ILLEGAL_URL_CHARS: [char; 10] = [' ', '"', '<', '>', '\\', '^', '`', '{', '|', '}'];

/// Parse `text` as an absolute URL suitable for a bare link.
///
/// # Examples
///
/// ```
/// use t2t_engine::try_parse_url;
///
/// assert!(try_parse_url("https://example.com/docs").is_some());
/// assert!(try_parse_url("example.com").is_none());
/// ```
#[must_use]
pub fn try_parse_url(text: &str) -> Option<Url> {
    if text.chars().any(|c| c.is_control() || ILLEGAL_URL_CHARS.contains(&c)) {
        return None;
    }

    let url = Url::parse(text).ok()?;
    let scheme = url.scheme();
    if !URL_SCHEMES.contains(&scheme) {
        return None;
    }
    if scheme != "mailto" && !text[scheme.len()..].starts_with("://") {
        return None;
    }
    Some(url)
}

/// Run the three link passes over `line`.
pub(crate) fn substitute_links<B: TargetBackend>(line: &str, backend: &B) -> String {
    let out = substitute_image_links(line, backend);
    let out = substitute_named_links(&out, backend);
    substitute_bare_urls(&out, backend)
}

/// `[[picture.png] http://example.com]` becomes a link labelled with the
/// rendered image.
fn substitute_image_links<B: TargetBackend>(line: &str, backend: &B) -> String {
    let mut out = line.to_owned();
    let mut pos = 0;

    while pos < out.len() {
        let Some(found) = IMAGE_LINK_RE.find_at(&out, pos) else {
            break;
        };
        let (start, end) = (found.start(), found.end());
        let Some(image_end) = out[start..].find(']').map(|idx| start + idx) else {
            break;
        };

        let target = out[image_end + 1..end - 1]
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default();
        if target.is_empty() {
            pos = end;
            continue;
        }

        let align = TextAlign::from_position(&out, start, end);
        let mut image = String::new();
        backend.image(&ImageLink::new(&out[start + 2..image_end], align), &mut image);

        let mut rendered = String::new();
        backend.link(&ImageLink::new(target, align).with_label(image), &mut rendered);

        out.replace_range(start..end, &rendered);
        pos = start + rendered.len();
    }

    out
}

/// `[label http://example.com]` and `[http://example.com]`.
fn substitute_named_links<B: TargetBackend>(line: &str, backend: &B) -> String {
    let mut out = line.to_owned();
    let mut pos = 0;

    while pos < out.len() {
        let Some(found) = NAMED_LINK_RE.find_at(&out, pos) else {
            break;
        };
        let (start, end) = (found.start(), found.end());

        if backend.already_rendered(&out[start..end]) {
            pos = end;
            continue;
        }

        let inner = &out[start + 1..end - 1];
        let (label, target) = match inner.rsplit_once(' ') {
            Some((label, target)) => (label.trim(), target),
            None => ("", inner),
        };
        if target.is_empty() {
            pos = end;
            continue;
        }

        let mut rendered = String::new();
        backend.link(
            &ImageLink::new(target, TextAlign::Left).with_label(label),
            &mut rendered,
        );

        out.replace_range(start..end, &rendered);
        pos = start + rendered.len();
    }

    out
}

/// Space-separated tokens that parse as URLs become links to themselves.
fn substitute_bare_urls<B: TargetBackend>(line: &str, backend: &B) -> String {
    line.split(' ')
        .map(|token| {
            if try_parse_url(token).is_none() {
                return token.to_owned();
            }
            let mut rendered = String::new();
            backend.link(&ImageLink::new(token, TextAlign::Left), &mut rendered);
            rendered.trim().to_owned()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HtmlBackend, ManBackend, WikiBackend};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_try_parse_url() {
        assert!(try_parse_url("http://example.com").is_some());
        assert!(try_parse_url("FTP://files.example.com/pub").is_some());
        assert!(try_parse_url("mailto:someone@example.com").is_some());
        assert!(try_parse_url("http:example.com").is_none());
        assert!(try_parse_url("javascript://alert").is_none());
        assert!(try_parse_url("href='http://example.com'>x</a>").is_none());
        assert!(try_parse_url("(http://example.com)").is_none());
        assert!(try_parse_url("word").is_none());
        assert!(try_parse_url("").is_none());
    }

    #[test]
    fn test_named_link_with_label() {
        let backend = HtmlBackend::new();
        assert_eq!(
            substitute_links("go [home page http://example.com] now", &backend),
            "go <a href='http://example.com'>home page</a> now"
        );
    }

    #[test]
    fn test_named_link_without_label() {
        let backend = HtmlBackend::new();
        assert_eq!(
            substitute_links("[http://example.com]", &backend),
            "<a href='http://example.com'>http://example.com</a>"
        );
    }

    #[test]
    fn test_bare_url() {
        let backend = HtmlBackend::new();
        assert_eq!(
            substitute_links("see http://example.com for more", &backend),
            "see <a href='http://example.com'>http://example.com</a> for more"
        );
    }

    #[test]
    fn test_image_link() {
        let backend = HtmlBackend::new();
        assert_eq!(
            substitute_links("[[logo.png] http://example.com]", &backend),
            "<a href='http://example.com'><img src='logo.png' style='text-align: left;' alt=''></a>"
        );
    }

    #[test]
    fn test_wiki_links_are_not_rendered_twice() {
        let backend = WikiBackend::new();
        assert_eq!(
            substitute_links("[[logo.png] http://example.com] and [docs http://example.org]", &backend),
            "[http://example.com (logo.png)] and [http://example.org docs]"
        );
    }

    #[test]
    fn test_man_bare_url_is_idempotent() {
        let backend = ManBackend::new();
        assert_eq!(
            substitute_links("visit http://example.com today", &backend),
            "visit http://example.com today"
        );
    }
}
