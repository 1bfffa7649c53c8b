//! Integration tests for the scanner module

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::{MarkerSet, ScanFilter, Scanner};
use crate::config::PatternMatcher;

fn managed() -> MarkerSet {
    MarkerSet::new(["ODG_", "(ON)"])
}

#[test]
fn test_marker_scenario() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ODG_PLA.json"), "{}").unwrap();
    fs::write(tmp.path().join("plain.json"), "{}").unwrap();

    let scanner = Scanner::new(ScanFilter::new(MarkerSet::new(["ODG_"])));
    let result = scanner.scan(tmp.path());

    assert_eq!(result.files, vec![PathBuf::from("ODG_PLA.json")]);
}

#[test]
fn test_recursive_scan_is_sorted_and_relative() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("vendor").join("deep");
    fs::create_dir_all(&nested).unwrap();

    fs::write(tmp.path().join("ODG_z.json"), "{}").unwrap();
    fs::write(nested.join("ODG_a.json"), "{}").unwrap();
    fs::write(tmp.path().join("Silk (ON).json"), "{}").unwrap();
    fs::write(tmp.path().join("unmanaged.json"), "{}").unwrap();

    let scanner = Scanner::new(ScanFilter::new(managed()));
    let result = scanner.scan(tmp.path());

    assert_eq!(
        result.files,
        vec![
            PathBuf::from("ODG_z.json"),
            PathBuf::from("Silk (ON).json"),
            PathBuf::from("vendor/deep/ODG_a.json"),
        ]
    );
}

#[test]
fn test_extension_and_name_filters_combine() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ODG_PETG.json"), "{}").unwrap();
    fs::write(tmp.path().join("ODG_PETG.info"), "").unwrap();
    fs::write(tmp.path().join("ODG_PLA.json"), "{}").unwrap();

    let filter = ScanFilter::new(managed())
        .with_extensions(["json"])
        .with_name_filter(Some("PeTg"));
    let result = Scanner::new(filter).scan(tmp.path());

    assert_eq!(result.files, vec![PathBuf::from("ODG_PETG.json")]);
}

#[test]
fn test_ignore_patterns_apply_to_relative_paths() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("archive");
    fs::create_dir(&archive).unwrap();
    fs::write(archive.join("ODG_old.json"), "{}").unwrap();
    fs::write(tmp.path().join("ODG_new.json"), "{}").unwrap();

    let patterns = PatternMatcher::with_patterns(&["archive/".to_string()], &[]).unwrap();
    let filter = ScanFilter::new(managed()).with_patterns(Some(patterns));
    let result = Scanner::new(filter).scan(tmp.path());

    assert_eq!(result.files, vec![PathBuf::from("ODG_new.json")]);
}

#[test]
fn test_wildcard_scan_includes_everything() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.json"), "{}").unwrap();
    fs::write(tmp.path().join("b.txt"), "").unwrap();

    let result = Scanner::new(ScanFilter::everything()).scan(tmp.path());
    assert_eq!(result.files.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_included() {
    use std::os::unix::fs as unix_fs;

    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("ODG_target.json");
    fs::write(&target, "{}").unwrap();
    unix_fs::symlink(&target, tmp.path().join("ODG_link.json")).unwrap();
    unix_fs::symlink("/nonexistent/ODG_gone.json", tmp.path().join("ODG_gone.json")).unwrap();

    let result = Scanner::new(ScanFilter::new(managed())).scan(tmp.path());

    assert_eq!(
        result.files,
        vec![PathBuf::from("ODG_link.json"), PathBuf::from("ODG_target.json")]
    );
}
