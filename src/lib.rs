/*!
 * # tweeseg - translation segmentation for passage-based stories
 *
 * A Rust library that mines translatable text out of interactive-fiction
 * documents made of `::`-delimited passages whose bodies interleave prose
 * with comments, `<<macros>>` and `<tags>`.
 *
 * ## Features
 *
 * - Split documents into named passages
 * - Tokenize passage bodies into comment, macro, tag and text spans
 * - Merge matching open/close markup, respecting nesting
 * - Pack adjacent blocks into segments bounded by a byte limit
 * - Emit stable `file|passage|index` keys for a translation platform
 * - Cache results per document content between runs
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `segmentation`: the pure `Document -> [Segment]` engine
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `segment_writer`: JSON output of segment lists
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod segment_writer;
pub mod segmentation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, SegmentError};
pub use segmentation::{Segment, SegmentCache, Segmenter, Stage};
