use std::path::Path;

use url::form_urlencoded;

/// Content type to upload a file with, guessed from its extension.
pub fn get_content_type(file_path: impl AsRef<Path>) -> &'static str {
    let extension = file_path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("tiff") | Some("tif") => "image/tiff",
        Some("bmp") => "image/bmp",
        Some("txt") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

/// URL-encoded query string with `key` repeated once per value:
/// `request_id=a&request_id=b`.
pub fn repeated_query<V: AsRef<str>>(key: &str, values: &[V]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for value in values {
        serializer.append_pair(key, value.as_ref());
    }
    serializer.finish()
}
