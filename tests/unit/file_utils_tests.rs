/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use tweeseg::file_utils::FileManager;
use crate::common;

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|e| e.to_string()).collect()
}

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.twee", ":: A\nx")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.twee"));
}

/// Test extension matching
#[test]
fn test_has_extension_withMixedCaseAndDots_shouldMatch() {
    let wanted = exts(&["twee", ".tw"]);
    assert!(FileManager::has_extension("a/story.TWEE", &wanted));
    assert!(FileManager::has_extension("story.tw", &wanted));
    assert!(!FileManager::has_extension("story.txt", &wanted));
    assert!(!FileManager::has_extension("README", &wanted));
}

/// Test recursive discovery of documents
#[test]
fn test_find_files_withNestedDirs_shouldFindMatchingFilesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.twee", "")?;
    common::create_test_file(temp_dir.path(), "a/nested.tw", "")?;
    common::create_test_file(temp_dir.path(), "a/ignored.js", "")?;

    let files = FileManager::find_files(temp_dir.path(), &exts(&["twee", "tw"]))?;

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("a/nested.tw"));
    assert!(files[1].ends_with("b.twee"));

    Ok(())
}

/// Test relative key paths
#[test]
fn test_relative_key_path_withNestedFile_shouldUseForwardSlashes() {
    let root = Path::new("/data/src");
    assert_eq!(FileManager::relative_key_path("/data/src/act1/intro.twee", root), "act1/intro.twee");
    assert_eq!(FileManager::relative_key_path("/elsewhere/x.twee", root), "x.twee");
}

/// Test that generate_output_path mirrors the relative path
#[test]
fn test_generate_output_path_withRelativePath_shouldReplaceExtension() {
    let output = FileManager::generate_output_path("/tmp/out", "act1/intro.twee", "json");
    assert_eq!(output, Path::new("/tmp/out/act1/intro.json"));

    let output = FileManager::generate_output_path("/tmp/out", "intro.twee", ".json");
    assert_eq!(output, Path::new("/tmp/out/intro.json"));
}

/// Test that write_to_file creates parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("deep/er/file.json");

    FileManager::write_to_file(&target, "[]")?;

    assert_eq!(FileManager::read_to_string(&target)?, "[]");
    Ok(())
}

/// Test that reading a missing file reports the path
#[test]
fn test_read_to_string_withMissingFile_shouldFailWithContext() {
    let err = FileManager::read_to_string("missing_dir/missing.twee").unwrap_err();
    assert!(format!("{}", err).contains("Failed to read file"));
}
