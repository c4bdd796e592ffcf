// Source layout tests
// Author: kelexine (https://github.com/kelexine)

use std::fs;
use std::path::{Path, PathBuf};

const MAX_WIDTH: usize = 100;

fn rust_sources(dir: &Path, found: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            rust_sources(&path, found);
        } else if path.extension().map_or(false, |ext| ext == "rs") {
            found.push(path);
        }
    }
}

#[test]
fn test_source_lines_fit_rustfmt_width() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    rust_sources(&src, &mut files);
    assert!(!files.is_empty());

    let mut too_wide = Vec::new();
    for file in &files {
        let content = fs::read_to_string(file).unwrap();
        for (number, line) in content.lines().enumerate() {
            if line.chars().count() > MAX_WIDTH {
                too_wide.push(format!("{}:{}", file.display(), number + 1));
            }
        }
    }

    assert!(too_wide.is_empty(), "lines over {} columns: {:?}", MAX_WIDTH, too_wide);
}
