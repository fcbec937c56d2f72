//! Content-type classification by file extension.

/// MIME type for a file name, based on its extension.
pub fn mime_for_filename(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".ifc") {
        "application/x-step"
    } else if lower.ends_with(".ids") {
        "application/xml"
    } else if lower.ends_with(".csv") {
        "text/csv"
    } else if lower.ends_with(".json") {
        "application/json"
    } else {
        "application/octet-stream"
    }
}

/// Last segment of a remote path.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
