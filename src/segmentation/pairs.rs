/*!
 * Combination of matching open/close markup into blocks.
 *
 * Walks a tiled span list left to right. An opening macro or tag searches
 * forward for the closer of the same construct at nesting depth zero; the
 * whole pair becomes one block when it fits the limit. Everything else
 * becomes a block on its own. Packing independent blocks together is left
 * to the size combiner.
 */

use log::trace;

use super::model::{Block, BlockOrigin, Span, SpanKind};

/// Index of the closer matching the opener at `spans[head]`, if any.
///
/// Another opener of the same construct deepens the nesting; a closer of
/// the same construct at depth one is the match.
pub fn find_matching_closer(spans: &[Span<'_>], head: usize) -> Option<usize> {
    let opener = spans.get(head)?;
    let mut depth = 1usize;

    for (offset, span) in spans[head + 1..].iter().enumerate() {
        if !opener.same_construct(span) {
            continue;
        }
        if span.is_closing() {
            depth -= 1;
            if depth == 0 {
                return Some(head + 1 + offset);
            }
        } else {
            depth += 1;
        }
    }

    None
}

/// Combine `spans` (which must tile `body`) into nesting-respecting blocks.
///
/// A body that fits within `limit` is returned as a single block without
/// looking at the spans. An empty body yields no blocks.
pub fn combine_pairs<'a>(body: &'a str, spans: &[Span<'a>], limit: usize) -> Vec<Block<'a>> {
    if body.is_empty() {
        return Vec::new();
    }
    if body.len() <= limit {
        return vec![Block::new(body, 0, body.len(), BlockOrigin::Passage)];
    }

    let mut blocks = Vec::with_capacity(spans.len());
    let mut i = 0;

    while i < spans.len() {
        let head = &spans[i];

        let is_opener = matches!(head.kind, SpanKind::Macro | SpanKind::Tag) && head.is_opening();
        if !is_opener {
            // text, comments and unmatched closers stand alone
            blocks.push(Block::from_span(head));
            i += 1;
            continue;
        }

        match find_matching_closer(spans, i) {
            Some(closer) if spans[closer].end - head.start <= limit => {
                blocks.push(Block::new(body, head.start, spans[closer].end, BlockOrigin::Pair));
                i = closer + 1;
            }
            Some(closer) => {
                trace!(
                    "Pair '{}' at {}..{} exceeds limit {}, keeping head alone",
                    head.text,
                    head.start,
                    spans[closer].end,
                    limit
                );
                blocks.push(Block::from_span(head));
                i += 1;
            }
            None => {
                blocks.push(Block::from_span(head));
                i += 1;
            }
        }
    }

    blocks
}
