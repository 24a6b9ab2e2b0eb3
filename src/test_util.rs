// Helpers shared by unit tests

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique path under the system temp dir; the file is not created
pub fn temp_file_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("hello_file_route_test");
    std::fs::create_dir_all(&dir).unwrap();
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.join(format!("{name}-{}-{n}.txt", std::process::id()))
}
