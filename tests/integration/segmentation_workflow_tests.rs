/*!
 * End-to-end segmentation of documents through the public pipeline
 */

use tweeseg::segmentation::passage::split_passages;
use tweeseg::segmentation::{AcceptAll, Segment, Segmenter};
use crate::common::SAMPLE_STORY;

fn texts(segments: &[Segment]) -> Vec<&str> {
    segments.iter().map(|s| s.original_text.as_str()).collect()
}

fn segment_body(body: &str, limit: usize) -> Vec<Segment> {
    let raw = format!(":: P\n{}", body);
    Segmenter::with_filter(limit, AcceptAll)
        .segment_document("doc.twee", &raw)
        .unwrap()
        .segments
}

#[test]
fn test_short_body_withinLimit_shouldBecomeOneSegment() {
    let segments = segment_body("Hello world", 20);
    assert_eq!(texts(&segments), vec!["Hello world"]);
    assert_eq!(segments[0].key, "doc|P|0");
}

#[test]
fn test_macro_pair_withTrailingText_shouldSplitIntoTwoSegments() {
    let segments = segment_body("<<if $x>>Hi<</if>> there!", 20);
    assert_eq!(texts(&segments), vec!["<<if $x>>Hi<</if>>", " there!"]);
    assert_eq!(segments[0].key, "doc|P|0");
    assert_eq!(segments[1].key, "doc|P|1");
}

#[test]
fn test_unclosed_macro_shouldBecomeAtomicSegment() {
    let segments = segment_body("<<widget>>", 20);
    assert_eq!(texts(&segments), vec!["<<widget>>"]);
}

#[test]
fn test_macro_pair_withOversizedContent_shouldEmitOpeningMacroAlone() {
    crate::common::init_test_logging();
    let body = format!("<<if $x>>{}<</if>>", "y".repeat(50));
    let segments = segment_body(&body, 20);

    assert_eq!(segments[0].original_text, "<<if $x>>");
    assert_eq!(segments[1].original_text, "y".repeat(50));
    assert_eq!(segments[2].original_text, "<</if>>");
}

#[test]
fn test_nested_same_name_pairs_shouldMergeAsOneSegment() {
    let body = "<<a>><<a>><</a>><</a>> then a long tail of ordinary prose";
    let segments = segment_body(body, 30);
    assert_eq!(segments[0].original_text, "<<a>><<a>><</a>><</a>>");
}

#[test]
fn test_header_withTagList_shouldResolveName() {
    let passages = split_passages("doc.twee", ":: Start [widget]\nbody").unwrap();
    assert_eq!(passages[0].name, "Start");
}

#[test]
fn test_sample_story_withDefaultFilter_shouldSkipScriptPassage() {
    let result = Segmenter::new(1000).segment_document("story.twee", SAMPLE_STORY).unwrap();

    assert_eq!(result.passages_total, 4);
    assert_eq!(result.passages_segmented, 3);
    let keys: Vec<&str> = result.segments.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["story|StoryTitle|0", "story|Start|0", "story|Hallway|0"]);
}

#[test]
fn test_sample_story_withSmallLimit_shouldKeepConstructsWhole() {
    let result = Segmenter::new(40).segment_document("story.twee", SAMPLE_STORY).unwrap();
    let start: Vec<&Segment> = result.segments.iter().filter(|s| s.key.starts_with("story|Start|")).collect();

    assert!(start.len() > 1);
    assert!(start.iter().any(|s| s.original_text.contains("/* <<set $x to 1>> describe the door */")));
    assert!(start.iter().any(|s| s.original_text.contains("<<if $lantern>>The lantern hums.<</if>>")));
    for segment in &start {
        assert!(segment.original_text.len() <= 40, "{:?}", segment.original_text);
    }
}

#[test]
fn test_sample_story_segments_shouldReconstructEveryPassageBody() {
    let passages = split_passages("story.twee", SAMPLE_STORY).unwrap();
    let result = Segmenter::with_filter(12, AcceptAll).segment_document("story.twee", SAMPLE_STORY).unwrap();

    for passage in passages.iter().filter(|p| !p.body.is_empty()) {
        let prefix = format!("story|{}|", passage.name);
        let rebuilt: String = result
            .segments
            .iter()
            .filter(|s| s.key.starts_with(&prefix))
            .map(|s| s.original_text.as_str())
            .collect();
        assert_eq!(rebuilt, passage.body, "passage {}", passage.name);
    }
}

#[test]
fn test_duplicate_passage_shouldAbortOnlyThatDocument() {
    let segmenter = Segmenter::default();
    assert!(segmenter.segment_document("bad.twee", ":: A\nx\n:: A\ny\n").is_err());
    assert!(segmenter.segment_document("good.twee", ":: A\nx\n:: B\ny\n").is_ok());
}

#[test]
fn test_empty_document_shouldYieldNoSegments() {
    let result = Segmenter::default().segment_document("empty.twee", "").unwrap();
    assert_eq!(result.passages_total, 0);
    assert!(result.segments.is_empty());
}
