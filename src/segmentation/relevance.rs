/*!
 * Passage relevance filtering.
 *
 * Consulted before a passage is tokenized, to skip passages that hold no
 * prose at all. Segmentation results of the passages that are kept do not
 * depend on the filter.
 */

use super::model::Passage;

/// Decides whether a passage is worth segmenting
pub trait PassageFilter: Send + Sync {
    fn should_segment(&self, passage: &Passage) -> bool;
}

/// Accepts every passage with a non-empty body
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PassageFilter for AcceptAll {
    fn should_segment(&self, passage: &Passage) -> bool {
        !passage.body.is_empty()
    }
}

/// Skips passages carrying one of a set of tags, and optionally passages
/// whose body is blank
#[derive(Debug, Clone)]
pub struct TagAndBlankFilter {
    skip_tags: Vec<String>,
    skip_blank: bool,
}

impl TagAndBlankFilter {
    pub fn new(skip_tags: Vec<String>, skip_blank: bool) -> Self {
        Self { skip_tags, skip_blank }
    }
}

impl Default for TagAndBlankFilter {
    fn default() -> Self {
        Self::new(vec!["script".to_string(), "stylesheet".to_string()], true)
    }
}

impl PassageFilter for TagAndBlankFilter {
    fn should_segment(&self, passage: &Passage) -> bool {
        if passage.body.is_empty() {
            return false;
        }
        if self.skip_blank && passage.body.trim().is_empty() {
            return false;
        }
        !self.skip_tags.iter().any(|tag| passage.has_tag(tag))
    }
}
