//! Content-type lookup by file extension
//!
//! Small fixed table; anything unknown falls back to
//! `application/octet-stream`, which clients treat as a download anyway.

use redeemd_core::OCTET_STREAM;

/// Content type for an extension (without the dot), matched
/// case-insensitively. `None` or an unknown extension yields the
/// octet-stream fallback.
#[must_use]
pub fn mime_for_extension(ext: Option<&str>) -> &'static str {
    let Some(ext) = ext else {
        return OCTET_STREAM;
    };

    match ext.to_ascii_lowercase().as_str() {
        "txt" | "text" | "log" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "xml" => "application/xml",
        "js" => "application/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => OCTET_STREAM,
    }
}
