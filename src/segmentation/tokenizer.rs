/*!
 * Span tokenization of a passage body.
 *
 * Comments and tags are found with regular expressions. Macros are found
 * with a small hand-written scanner, because their argument blob has to
 * understand quoted strings and `[[link]]` syntax that may themselves
 * contain `>>`.
 *
 * The three scans run independently, so a macro-looking substring inside a
 * comment is matched too; removing those is the job of the filter stage.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Marker, Span, SpanKind};

// @const: Block comments in either bracket style, non-greedy, multi-line
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)/\*.*?\*/|<!--.*?-->").expect("Invalid comment regex")
});

// @const: Opening or closing tag head; the `>` must not be followed by another `>`
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z][\w-]*)(?:\s[^<>]*)?/?>").expect("Invalid tag regex")
});

/// Find every comment, macro and tag span in `body`, sorted by start offset.
/// Gaps are not filled.
pub fn scan_spans(body: &str) -> Vec<Span<'_>> {
    let mut spans = scan_comments(body);
    spans.extend(scan_macros(body));
    spans.extend(scan_tags(body));
    spans.sort_by_key(|span| span.start);
    spans
}

/// Find all markup spans and fill the gaps with text spans.
pub fn tokenize(body: &str) -> Vec<Span<'_>> {
    fill_gaps(body, scan_spans(body))
}

/// Insert a text span over every stretch of `body` not covered by `spans`.
///
/// `spans` must be sorted by start. Overlapping input is tolerated: a gap is
/// only ever synthesized after the furthest end seen so far.
pub fn fill_gaps<'a>(body: &'a str, spans: Vec<Span<'a>>) -> Vec<Span<'a>> {
    let mut filled = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.start > cursor {
            filled.push(Span::text(body, cursor, span.start));
        }
        cursor = cursor.max(span.end);
        filled.push(span);
    }

    if cursor < body.len() {
        filled.push(Span::text(body, cursor, body.len()));
    }

    filled
}

pub fn scan_comments(body: &str) -> Vec<Span<'_>> {
    COMMENT_REGEX
        .find_iter(body)
        .map(|m| Span::new(SpanKind::Comment, body, m.start(), m.end(), None))
        .collect()
}

pub fn scan_tags(body: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TAG_REGEX.captures_at(body, pos) {
        let Some(whole) = caps.get(0) else { break };

        // `<b>>` is the tail of a macro delimiter, not a tag
        if body.as_bytes().get(whole.end()) == Some(&b'>') {
            pos = whole.start() + 1;
            continue;
        }

        let closing = caps.get(1).is_some_and(|slash| !slash.is_empty());
        let name = caps.get(2).map_or("", |m| m.as_str());

        spans.push(Span::new(
            SpanKind::Tag,
            body,
            whole.start(),
            whole.end(),
            Some(Marker { name, closing }),
        ));
        pos = whole.end();
    }

    spans
}

pub fn scan_macros(body: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = body[pos..].find("<<") {
        let start = pos + offset;
        match scan_macro_at(body, start) {
            Some((end, marker)) => {
                spans.push(Span::new(SpanKind::Macro, body, start, end, Some(marker)));
                pos = end;
            }
            None => pos = start + 1,
        }
    }

    spans
}

fn is_macro_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'=')
}

/// Try to read one macro starting at `start` (which points at `<<`).
/// Returns the end offset and marker on success.
fn scan_macro_at(body: &str, start: usize) -> Option<(usize, Marker<'_>)> {
    let bytes = body.as_bytes();
    let mut i = start + 2;

    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    while i < bytes.len() && is_macro_name_byte(bytes[i]) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = &body[name_start..i];

    // Argument blob, up to the first `>>` outside quotes and links.
    // Only ASCII bytes are compared, so stepping through multi-byte
    // characters one byte at a time is safe.
    while i < bytes.len() {
        match bytes[i] {
            b'>' if bytes.get(i + 1) == Some(&b'>') => {
                return Some((i + 2, Marker { name, closing }));
            }
            b'\\' => i += 2,
            quote @ (b'"' | b'\'' | b'`') => {
                i = match closing_quote(bytes, i + 1, quote) {
                    Some(close) => close + 1,
                    None => i + 1,
                };
            }
            b'[' if bytes.get(i + 1) == Some(&b'[') => {
                i = match find_bytes(bytes, i + 2, b"]]") {
                    Some(close) => close + 2,
                    None => i + 2,
                };
            }
            _ => i += 1,
        }
    }

    None
}

/// Index of the unescaped `quote` at or after `from`
fn closing_quote(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => return Some(j),
            _ => j += 1,
        }
    }
    None
}

fn find_bytes(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}
