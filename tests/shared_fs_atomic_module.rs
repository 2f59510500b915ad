use hookflow::shared::fs_atomic::{atomic_write_file, atomic_write_json};
use std::fs;

#[test]
fn shared_fs_atomic_writes_and_overwrites() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("nested/state.json");

    atomic_write_file(&target, b"first").expect("write first");
    assert_eq!(fs::read_to_string(&target).expect("read first"), "first");

    atomic_write_file(&target, b"second").expect("write second");
    assert_eq!(fs::read_to_string(&target).expect("read second"), "second");
}

#[test]
fn shared_fs_atomic_leaves_no_temp_files_behind() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("state.json");

    atomic_write_file(&target, b"content").expect("write");

    let entries: Vec<_> = fs::read_dir(temp.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);
}

#[test]
fn shared_fs_atomic_serializes_json_values() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("record.json");

    atomic_write_json(&target, &serde_json::json!({"currentStep": 2})).expect("write json");

    let raw = fs::read_to_string(&target).expect("read");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
    assert_eq!(value["currentStep"], 2);
}
