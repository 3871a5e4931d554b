// Integration tests for util/file_size.rs
//
// Coverage:
//   - regular files report their length
//   - directories and missing paths report 0
//   - totals sum the regular files only

use std::fs;
use std::path::Path;

use lzjb::util::{get_file_size, get_total_file_size};

#[test]
fn sizes() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, vec![1u8; 1000]).unwrap();
    fs::write(&b, b"xyz").unwrap();
    assert_eq!(get_file_size(&a), 1000);
    assert_eq!(get_file_size(dir.path()), 0);
    assert_eq!(get_file_size(Path::new("/nonexistent/__size__")), 0);
    assert_eq!(get_total_file_size(&[a.as_path(), b.as_path(), dir.path()]), 1003);
}
