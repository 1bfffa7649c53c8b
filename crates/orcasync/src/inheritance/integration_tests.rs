//! Integration tests for inheritance flattening over real folders

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

use super::{FlattenDepth, Flattener};
use crate::error::Issue;

fn write(root: &Path, relative: &str, value: &Value) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

#[test]
fn test_missing_base_is_reported_and_siblings_still_flatten() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Generic PLA.json", &json!({"name": "Generic PLA", "temp": 210}));
    write(
        tmp.path(),
        "ODG_PLA.json",
        &json!({"name": "ODG PLA", "inherits": "Generic PLA"}),
    );
    write(
        tmp.path(),
        "ODG_Orphan.json",
        &json!({"name": "ODG Orphan", "inherits": "Vanished Base"}),
    );

    let report = Flattener::default().flatten_dir(tmp.path());

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].relative_path, PathBuf::from("ODG_PLA.json"));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        Issue::BaseNotFound { base, .. } if base == "Vanished Base"
    )));
}

#[test]
fn test_base_in_subfolder_resolves() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "base/Generic.json", &json!({"name": "Generic", "a": 1}));
    write(tmp.path(), "ODG_X.json", &json!({"name": "X", "inherits": "Generic"}));

    let report = Flattener::default().flatten_dir(tmp.path());

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].document["a"], json!(1));
}

#[test]
fn test_flatten_is_idempotent_after_write() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "base.json", &json!({"name": "B", "a": 1, "b": 2}));
    write(tmp.path(), "child.json", &json!({"name": "C", "inherits": "B", "b": 3}));

    let first = Flattener::default().flatten_dir(tmp.path());
    for result in &first.results {
        fs::write(&result.path, result.to_pretty_json().unwrap()).unwrap();
    }
    let written = fs::read(tmp.path().join("child.json")).unwrap();

    let second = Flattener::default().flatten_dir(tmp.path());

    assert!(second.results.is_empty());
    assert_eq!(fs::read(tmp.path().join("child.json")).unwrap(), written);
}

#[test]
fn test_transitive_cycle_is_reported_per_chain() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", &json!({"name": "A", "inherits": "B"}));
    write(tmp.path(), "b.json", &json!({"name": "B", "inherits": "A"}));
    write(tmp.path(), "base.json", &json!({"name": "Base", "k": 1}));
    write(tmp.path(), "ok.json", &json!({"name": "Ok", "inherits": "Base"}));

    let report = Flattener::new(FlattenDepth::Transitive).flatten_dir(tmp.path());

    let cycles: Vec<_> = report
        .issues
        .iter()
        .filter_map(|issue| match issue {
            Issue::InheritanceCycle { chain, .. } => Some(chain.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(cycles.len(), 2);
    assert!(cycles.contains(&vec!["A".to_string(), "B".to_string(), "A".to_string()]));
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].base_name, "Base");
}

#[test]
fn test_single_pass_does_not_loop_on_cycles() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", &json!({"name": "A", "inherits": "B", "a": 1}));
    write(tmp.path(), "b.json", &json!({"name": "B", "inherits": "A", "b": 2}));

    let report = Flattener::new(FlattenDepth::SinglePass).flatten_dir(tmp.path());

    assert_eq!(report.results.len(), 2);
    assert!(report.results.iter().all(|r| !r.document.contains_key("inherits")));
}

#[test]
fn test_duplicate_names_and_invalid_files_are_reported() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a/dup.json", &json!({"name": "Dup", "v": 1}));
    write(tmp.path(), "b/dup.json", &json!({"name": "Dup", "v": 2}));
    write(tmp.path(), "child.json", &json!({"name": "C", "inherits": "Dup"}));
    fs::write(tmp.path().join("broken.json"), "{").unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let report = Flattener::default().flatten_dir(tmp.path());

    assert_eq!(report.results[0].document["v"], json!(2));
    assert!(report.issues.iter().any(|i| matches!(i, Issue::DuplicateProfileName { .. })));
    assert!(report.issues.iter().any(|i| matches!(i, Issue::InvalidJson { .. })));
}

#[test]
fn test_missing_folder_flattens_nothing() {
    let tmp = TempDir::new().unwrap();
    let report = Flattener::default().flatten_dir(&tmp.path().join("filament"));
    assert!(report.results.is_empty());
    assert!(report.issues.is_empty());
}
