//! MIME type detection module
//!
//! Picks the Content-Type of the served file from its extension.

use std::path::Path;

/// Content-Type for plain text targets
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Used when the extension is not a text one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Get MIME Content-Type for a file path
///
/// # Examples
/// ```
/// use std::path::Path;
/// use hello_file_route::http::mime::content_type_for;
/// let target = Path::new("/tmp/app/data/my-file.txt");
/// assert_eq!(content_type_for(target), "text/plain; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("/tmp/blob")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt") || e.eq_ignore_ascii_case("text"));

    if is_text {
        TEXT_CONTENT_TYPE
    } else {
        DEFAULT_CONTENT_TYPE
    }
}
