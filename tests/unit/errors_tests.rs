/*!
 * Tests for error types and conversions
 */

use tweeseg::errors::{AppError, SegmentError};

fn duplicate() -> SegmentError {
    SegmentError::DuplicatePassage {
        filepath: "story/intro.twee".to_string(),
        name: "Start".to_string(),
    }
}

#[test]
fn test_segmentError_duplicatePassage_shouldDisplayFileAndName() {
    let display = format!("{}", duplicate());
    assert!(display.contains("Duplicate passage"));
    assert!(display.contains("Start"));
    assert!(display.contains("story/intro.twee"));
}

#[test]
fn test_appError_fromSegmentError_shouldWrapCorrectly() {
    let app_error: AppError = duplicate().into();
    assert!(matches!(app_error, AppError::Segment(_)));
    assert!(format!("{}", app_error).contains("Segmentation error"));
}

#[test]
fn test_appError_fromAnyhowWrappingSegmentError_shouldRecoverSegmentError() {
    let error = anyhow::Error::new(duplicate());
    let app_error: AppError = error.into();
    assert!(matches!(app_error, AppError::Segment(SegmentError::DuplicatePassage { .. })));
}

#[test]
fn test_appError_fromAnyhowOther_shouldBeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something else").into();
    assert!(matches!(app_error, AppError::Unknown(_)));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}
