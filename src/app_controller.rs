use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::segment_writer::SegmentWriter;
use crate::segmentation::{SegmentCache, Segmenter, TagAndBlankFilter};

// @module: Application controller for document segmentation

/// Counters for one run over one or more documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents segmented and written successfully
    pub files_processed: usize,

    /// Documents that failed (unreadable, duplicate passages, unwritable output)
    pub files_failed: usize,

    /// Documents whose segments came from the cache
    pub files_cached: usize,

    /// Passages found in freshly segmented documents
    pub passages: usize,

    /// Segments written
    pub segments: usize,

    /// Segments longer than the limit
    pub oversized_segments: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;
        self.passages += outcome.passages;
        self.segments += outcome.segments;
        self.oversized_segments += outcome.oversized;
        if outcome.from_cache {
            self.files_cached += 1;
        }
    }
}

/// Result of segmenting a single document
#[derive(Debug, Clone, Default)]
struct FileOutcome {
    passages: usize,
    segments: usize,
    oversized: usize,
    from_cache: bool,
}

/// Everything one segmentation job needs, cheap to clone into worker threads
#[derive(Clone)]
struct Worker {
    segmenter: Segmenter,
    writer: SegmentWriter,
    cache: SegmentCache,
}

impl Worker {
    // @processes: One document from source to sink
    fn process(&self, input: &Path, key_path: &str, output_path: &Path) -> Result<FileOutcome> {
        let raw_text = FileManager::read_to_string(input)?;
        let limit = self.segmenter.limit();

        if let Some(segments) = self.cache.get(key_path, &raw_text, limit) {
            self.writer.write(output_path, &segments)?;
            return Ok(FileOutcome {
                passages: 0,
                segments: segments.len(),
                oversized: segments.iter().filter(|s| s.original_text.len() > limit).count(),
                from_cache: true,
            });
        }

        let document = self
            .segmenter
            .segment_document(key_path, &raw_text)
            .with_context(|| format!("Failed to segment {}", key_path))?;

        let mut oversized = 0;
        for segment in document.oversized(limit) {
            oversized += 1;
            warn!(
                "Segment {} is {} bytes, over the {} byte limit",
                segment.key,
                segment.original_text.len(),
                limit
            );
        }

        self.writer.write(output_path, &document.segments)?;
        self.cache.store(key_path, &raw_text, limit, &document.segments);

        Ok(FileOutcome {
            passages: document.passages_total,
            segments: document.segments.len(),
            oversized,
            from_cache: false,
        })
    }
}

/// Main application controller for document segmentation
pub struct Controller {
    // @field: App configuration
    config: Config,

    worker: Worker,
}

impl Controller {
    /// Create a controller with default configuration and no cache
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let cache = match config.cache.resolved_path() {
            Some(path) => SegmentCache::load(&path)?,
            None => SegmentCache::new(false),
        };

        Ok(Self::with_cache(config, cache))
    }

    /// Create a controller around a caller-supplied cache
    pub fn with_cache(config: Config, cache: SegmentCache) -> Self {
        let filter = TagAndBlankFilter::new(
            config.segmentation.skip_tags.clone(),
            config.segmentation.skip_blank_passages,
        );
        let worker = Worker {
            segmenter: Segmenter::with_filter(config.segmentation.max_segment_len, filter),
            writer: SegmentWriter::new(config.output.pretty),
            cache,
        };

        Self { config, worker }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &SegmentCache {
        &self.worker.cache
    }

    /// Segment a single document into `output_dir`
    pub async fn run_file(&self, input_file: PathBuf, output_dir: PathBuf) -> Result<RunSummary> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let start_time = Instant::now();
        let key_path = FileManager::relative_key_path(&input_file, input_file.parent().unwrap_or(Path::new("")));
        let output_path = FileManager::generate_output_path(&output_dir, &key_path, &self.config.output.extension);

        let outcome = self.worker.process(&input_file, &key_path, &output_path)?;

        let mut summary = RunSummary::default();
        summary.record(&outcome);

        self.persist_cache()?;

        info!(
            "Wrote {} segments to {:?} in {}",
            summary.segments,
            output_path,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Segment every document under `input_dir`, mirroring the directory
    /// layout under `output_dir`. A failing document is logged and counted;
    /// the others are still processed.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: PathBuf) -> Result<RunSummary> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let start_time = Instant::now();
        let files = FileManager::find_files(&input_dir, &self.config.input.extensions)?;

        if files.is_empty() {
            warn!(
                "No documents with extensions [{}] found in {:?}",
                self.config.input.extensions.join(", "),
                input_dir
            );
            return Ok(RunSummary::default());
        }

        info!("Segmenting {} documents from {:?}", files.len(), input_dir);

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Segmenting");

        let extension = self.config.output.extension.clone();
        let results = stream::iter(files)
            .map(|path| {
                let worker = self.worker.clone();
                let key_path = FileManager::relative_key_path(&path, &input_dir);
                let output_path = FileManager::generate_output_path(&output_dir, &key_path, &extension);
                let progress = folder_pb.clone();

                async move {
                    let task_key = key_path.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        worker.process(&path, &task_key, &output_path)
                    })
                    .await
                    .map_err(|e| anyhow!("Segmentation task failed: {}", e))
                    .and_then(|outcome| outcome);

                    progress.inc(1);
                    (key_path, result)
                }
            })
            .buffer_unordered(self.config.concurrent_files)
            .collect::<Vec<_>>()
            .await;

        folder_pb.finish_and_clear();

        let mut summary = RunSummary::default();
        for (key_path, result) in results {
            match result {
                Ok(outcome) => {
                    debug!("{}: {} segments", key_path, outcome.segments);
                    summary.record(&outcome);
                }
                Err(e) => {
                    error!("{:#}", e);
                    summary.files_failed += 1;
                }
            }
        }

        self.persist_cache()?;

        info!(
            "Segmented {} documents ({} failed, {} from cache) into {} segments in {}",
            summary.files_processed,
            summary.files_failed,
            summary.files_cached,
            summary.segments,
            Self::format_duration(start_time.elapsed())
        );
        if summary.oversized_segments > 0 {
            warn!(
                "{} segments exceed the {} byte limit",
                summary.oversized_segments, self.config.segmentation.max_segment_len
            );
        }

        Ok(summary)
    }

    /// Write the cache back to its configured location, if caching is on
    pub fn persist_cache(&self) -> Result<()> {
        if !self.worker.cache.is_enabled() {
            return Ok(());
        }
        match self.config.cache.resolved_path() {
            Some(path) => {
                let (hits, misses, hit_rate) = self.worker.cache.stats();
                debug!("Segment cache: {} hits, {} misses ({:.0}%)", hits, misses, hit_rate * 100.0);
                self.worker.cache.persist(&path)
            }
            None => Ok(()),
        }
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
