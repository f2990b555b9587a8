/*!
 * Tests for segment cache functionality
 */

use anyhow::Result;
use tweeseg::segmentation::cache::fingerprint;
use tweeseg::segmentation::{Segment, SegmentCache, Stage};
use crate::common;

fn segments(texts: &[&str]) -> Vec<Segment> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Segment {
            key: format!("story|Start|{}", i),
            original_text: text.to_string(),
            translation: String::new(),
            context: String::new(),
            stage: Stage::Untranslated,
        })
        .collect()
}

#[test]
fn test_cache_store_withEnabledCache_shouldReturnSegments() {
    let cache = SegmentCache::new(true);
    let stored = segments(&["Hello", " world"]);
    cache.store("story.twee", ":: Start\nHello world", 20, &stored);

    assert_eq!(cache.get("story.twee", ":: Start\nHello world", 20), Some(stored));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_get_withChangedContentOrLimit_shouldMiss() {
    let cache = SegmentCache::new(true);
    cache.store("story.twee", "v1", 20, &segments(&["a"]));

    assert!(cache.get("story.twee", "v2", 20).is_none());
    assert!(cache.get("story.twee", "v1", 30).is_none());
    assert!(cache.get("other.twee", "v1", 20).is_none());

    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!(hits, 0);
    assert_eq!(misses, 3);
    assert_eq!(hit_rate, 0.0);
}

#[test]
fn test_cache_store_withNewContentForSamePath_shouldReplaceEntry() {
    let cache = SegmentCache::new(true);
    cache.store("story.twee", "v1", 20, &segments(&["a"]));
    cache.store("story.twee", "v2", 20, &segments(&["b"]));

    assert_eq!(cache.len(), 1);
    assert!(cache.get("story.twee", "v1", 20).is_none());
    assert!(cache.get("story.twee", "v2", 20).is_some());
}

#[test]
fn test_cache_withDisabledCache_shouldNeverHit() {
    let cache = SegmentCache::new(false);
    cache.store("story.twee", "v1", 20, &segments(&["a"]));
    assert!(cache.get("story.twee", "v1", 20).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_persist_thenLoad_shouldRoundTripEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("cache/segments.json");

    let cache = SegmentCache::new(true);
    cache.store("a.twee", "alpha", 20, &segments(&["alpha"]));
    cache.store("b.twee", "beta", 20, &segments(&["be", "ta"]));
    cache.persist(&path)?;

    let loaded = SegmentCache::load(&path)?;
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get("b.twee", "beta", 20), Some(segments(&["be", "ta"])));

    Ok(())
}

#[test]
fn test_cache_load_withMissingFile_shouldStartEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let cache = SegmentCache::load(temp_dir.path().join("none.json"))?;
    assert!(cache.is_empty());
    assert!(cache.is_enabled());
    Ok(())
}

#[test]
fn test_cache_load_withOtherVersion_shouldIgnoreEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "old.json", r#"{"version":0,"entries":[]}"#)?;
    assert!(SegmentCache::load(&path)?.is_empty());
    Ok(())
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache = SegmentCache::new(true);
    let clone = cache.clone();
    clone.store("a.twee", "x", 5, &segments(&["x"]));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(clone.is_empty());
}

#[test]
fn test_fingerprint_shouldBeStableHexSha256() {
    let print = fingerprint("abc");
    assert_eq!(print, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    assert_eq!(print, fingerprint("abc"));
}
