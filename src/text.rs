//! Aozora Bunko text normalization.
//!
//! Turns a decoded Aozora Bunko text file into plain prose. The steps run in
//! a fixed order and each one assumes the previous ones already ran:
//!
//! 1. keep only the body between the second and third horizontal rules
//! 2. cut the colophon starting at `底本：`
//! 3. drop ruby glosses `《…》`
//! 4. drop editorial notes `［＃…］`
//! 5. drop ideographic spaces (U+3000)
//! 6. CRLF to LF
//! 7. collapse three or more newlines to two
//! 8. trim surrounding whitespace
//!
//! Glosses and notes are matched non-greedily within a single line; an empty
//! `《》` is left alone.

use regex::Regex;
use std::sync::LazyLock;

/// Marks the start of the bibliographic notes at the end of a work.
pub const COLOPHON_MARKER: &str = "底本：";

static HORIZONTAL_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{5,}").unwrap());

static RUBY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"《.+?》").unwrap());

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"［＃.+?］").unwrap());

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean a decoded document. Never fails; empty input gives empty output.
pub fn normalize(raw: &str) -> String {
    let body = strip_front_matter(raw);
    let body = truncate_colophon(body);
    let body = RUBY.replace_all(body, "");
    let body = ANNOTATION.replace_all(&body, "");
    let body = body.replace('\u{3000}', "").replace("\r\n", "\n");
    let body = BLANK_LINES.replace_all(&body, "\n\n");
    body.trim_matches(is_trimmed).to_string()
}

/// Unicode whitespace plus the information separators U+001C to U+001F
fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// The header block and the notation legend are each closed by a run of
/// hyphens; the third segment is the work itself. Text with fewer than two
/// rules is returned unchanged.
fn strip_front_matter(text: &str) -> &str {
    HORIZONTAL_RULE.split(text).nth(2).unwrap_or(text)
}

fn truncate_colophon(text: &str) -> &str {
    text.split_once(COLOPHON_MARKER)
        .map_or(text, |(body, _)| body)
}
