/*!
 * Segmentation engine for passage-based interactive-fiction documents.
 *
 * - `passage`: splitting a document into named passages
 * - `tokenizer`: comment, macro, tag and text spans of a passage body
 * - `filter`: removal of spans matched inside comments or other spans
 * - `pairs`: merging of matching open/close markup into blocks
 * - `combiner`: greedy size-bounded packing of adjacent blocks
 * - `emitter`: keyed segments for the translation platform
 * - `relevance`: which passages are worth segmenting at all
 * - `cache`: caller-owned cache of previous results
 * - `pipeline`: the whole chain for one document
 */

pub use self::cache::SegmentCache;
pub use self::model::{Block, BlockOrigin, Marker, Passage, Segment, Span, SpanKind, Stage};
pub use self::pipeline::{DocumentSegments, Segmenter, DEFAULT_SEGMENT_LIMIT};
pub use self::relevance::{AcceptAll, PassageFilter, TagAndBlankFilter};

pub mod cache;
pub mod combiner;
pub mod emitter;
pub mod filter;
pub mod model;
pub mod pairs;
pub mod passage;
pub mod pipeline;
pub mod relevance;
pub mod tokenizer;
