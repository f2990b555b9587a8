/*!
 * Passage splitting.
 *
 * A document is a sequence of passages, each introduced by a header line
 * starting with `::`. The header may carry a tag list (`[a b]`) and a
 * metadata object (`{...}`); neither is part of the passage name.
 */

use std::collections::HashSet;
use log::trace;

use crate::errors::SegmentError;
use super::model::Passage;

/// Token that starts every passage header at the beginning of a line
pub const HEADER_DELIMITER: &str = "::";

/// Split a raw document into its passages, in document order.
///
/// Text before the first header belongs to no passage and is dropped.
/// A name defined twice in the same document is an error.
pub fn split_passages(filepath: &str, raw_text: &str) -> Result<Vec<Passage>, SegmentError> {
    if raw_text.is_empty() {
        return Ok(Vec::new());
    }

    let document = format!("\n{}", raw_text);
    let separator = format!("\n{}", HEADER_DELIMITER);

    let mut seen = HashSet::new();
    let mut passages = Vec::new();

    for chunk in document.split(separator.as_str()).skip(1) {
        let (header, body) = chunk.split_once('\n').unwrap_or((chunk, ""));
        let (name, tags) = parse_header(header);

        if !seen.insert(name.clone()) {
            return Err(SegmentError::DuplicatePassage {
                filepath: filepath.to_string(),
                name,
            });
        }

        trace!("Passage '{}' in {} ({} bytes)", name, filepath, body.len());

        passages.push(Passage {
            filepath: filepath.to_string(),
            name,
            tags,
            body: body.to_string(),
            full_text: format!("{}{}", HEADER_DELIMITER, chunk),
        });
    }

    Ok(passages)
}

/// Extract the passage name and tag list from a header line
/// (the text after `::`).
pub fn parse_header(header: &str) -> (String, Vec<String>) {
    let mut head = header.trim();

    if head.ends_with('}') {
        if let Some(open) = head.rfind('{') {
            head = head[..open].trim_end();
        }
    }

    let mut tags = Vec::new();
    if head.ends_with(']') {
        if let Some(open) = head.find('[') {
            tags = head[open + 1..head.len() - 1]
                .split_whitespace()
                .map(str::to_string)
                .collect();
            head = &head[..open];
        }
    }

    (head.trim().to_string(), tags)
}
