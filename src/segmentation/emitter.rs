/*!
 * Segment key emission.
 */

use std::path::Path;

use super::model::{Block, Segment, Stage};

/// Key prefix for a document: its path without extension, with `/`
/// separators on every platform.
pub fn key_prefix(filepath: &str) -> String {
    Path::new(filepath)
        .with_extension("")
        .to_string_lossy()
        .replace('\\', "/")
}

/// Build the key of the `index`-th segment of a passage
pub fn segment_key(prefix: &str, passage_name: &str, index: usize) -> String {
    format!("{}|{}|{}", prefix, passage_name, index)
}

/// Turn the final blocks of one passage into untranslated segments,
/// numbered from zero in position order.
pub fn emit_segments(filepath: &str, passage_name: &str, blocks: &[Block<'_>]) -> Vec<Segment> {
    let prefix = key_prefix(filepath);

    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| Segment {
            key: segment_key(&prefix, passage_name, index),
            original_text: block.text.to_string(),
            translation: String::new(),
            context: String::new(),
            stage: Stage::Untranslated,
        })
        .collect()
}
