/*!
 * The full `Document -> [Segment]` pipeline.
 *
 * Splitter -> tokenizer -> filter -> pair combiner -> size combiner ->
 * emitter. Each passage is processed on its own and nothing is shared
 * between passages or documents, so a `Segmenter` can be used from many
 * threads at once.
 */

use std::sync::Arc;
use log::debug;

use crate::errors::SegmentError;
use super::combiner::combine_by_size;
use super::emitter::emit_segments;
use super::filter::filter_spans;
use super::model::{Block, Passage, Segment};
use super::pairs::combine_pairs;
use super::passage::split_passages;
use super::relevance::{PassageFilter, TagAndBlankFilter};
use super::tokenizer::tokenize;

/// Default maximum segment length in bytes
pub const DEFAULT_SEGMENT_LIMIT: usize = 1000;

/// Segments of one document plus counters for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSegments {
    /// Passages found in the document
    pub passages_total: usize,

    /// Passages that passed the relevance filter
    pub passages_segmented: usize,

    /// Segments in document order
    pub segments: Vec<Segment>,
}

impl DocumentSegments {
    /// Segments longer than `limit`: single constructs that could not be split
    pub fn oversized(&self, limit: usize) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(move |segment| segment.original_text.len() > limit)
    }
}

/// Configured segmentation engine
#[derive(Clone)]
pub struct Segmenter {
    limit: usize,
    filter: Arc<dyn PassageFilter>,
}

impl Segmenter {
    /// Create a segmenter with the default relevance filter.
    /// A `limit` of zero is raised to one.
    pub fn new(limit: usize) -> Self {
        Self::with_filter(limit, TagAndBlankFilter::default())
    }

    pub fn with_filter<F: PassageFilter + 'static>(limit: usize, filter: F) -> Self {
        Self {
            limit: limit.max(1),
            filter: Arc::new(filter),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Final blocks of one passage body
    pub fn segment_body<'a>(&self, body: &'a str) -> Vec<Block<'a>> {
        // Short bodies never need tokenizing
        if body.len() <= self.limit {
            return combine_pairs(body, &[], self.limit);
        }

        let spans = filter_spans(body, tokenize(body));
        let blocks = combine_pairs(body, &spans, self.limit);
        combine_by_size(body, blocks, self.limit)
    }

    /// Segments of one passage
    pub fn segment_passage(&self, passage: &Passage) -> Vec<Segment> {
        let blocks = self.segment_body(&passage.body);
        emit_segments(&passage.filepath, &passage.name, &blocks)
    }

    /// Segment a whole document. Fails only if a passage name is defined twice.
    pub fn segment_document(&self, filepath: &str, raw_text: &str) -> Result<DocumentSegments, SegmentError> {
        let passages = split_passages(filepath, raw_text)?;

        let mut result = DocumentSegments {
            passages_total: passages.len(),
            ..Default::default()
        };

        for passage in passages.iter().filter(|p| self.filter.should_segment(p)) {
            result.passages_segmented += 1;
            result.segments.extend(self.segment_passage(passage));
        }

        debug!(
            "{}: {} passages, {} segmented, {} segments",
            filepath,
            result.passages_total,
            result.passages_segmented,
            result.segments.len()
        );

        Ok(result)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_LIMIT)
    }
}

impl std::fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segmenter").field("limit", &self.limit).finish()
    }
}
