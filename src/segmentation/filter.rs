/*!
 * Removal of spurious spans.
 *
 * Comment, macro and tag scans run independently, so markup written inside
 * a comment is matched as well, and so is a comment opener written inside a
 * macro argument. One ordered sweep settles both: a span is kept only if it
 * starts at or after the end of every span kept before it. A comment thus
 * swallows its interior only once it has itself survived. The gaps are then
 * re-filled so the result tiles the body again.
 */

use super::model::{Span, SpanKind};
use super::tokenizer::fill_gaps;

/// Drop every span that starts inside an earlier kept span, e.g. markup
/// inside a comment or a tag inside a macro's quoted argument.
///
/// `spans` must be sorted by start. Kept spans never overlap, so the last
/// kept span always has the furthest end.
pub fn drop_enclosed<'a>(spans: Vec<Span<'a>>) -> Vec<Span<'a>> {
    let mut kept: Vec<Span<'a>> = Vec::with_capacity(spans.len());

    for span in spans {
        match kept.last() {
            Some(previous) if span.start < previous.end => continue,
            _ => kept.push(span),
        }
    }

    kept
}

/// Filter a tokenized span list and restore the tiling of `body`.
///
/// Text spans are discarded and synthesized afresh, so a gap left by a
/// removed span never ends up split across several text spans.
pub fn filter_spans<'a>(body: &'a str, spans: Vec<Span<'a>>) -> Vec<Span<'a>> {
    let markup: Vec<Span<'a>> = spans
        .into_iter()
        .filter(|span| span.kind != SpanKind::Text)
        .collect();

    fill_gaps(body, drop_enclosed(markup))
}
