//! Chunked file-body streaming
//!
//! Files are emitted in fixed-size chunks so response memory stays bounded
//! regardless of file size; the adapter never holds a whole file.

use axum::body::Body;
use redeemd_core::STREAM_CHUNK_SIZE;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Open `path` and wrap it as a chunked response body.
pub async fn file_body(path: &Path) -> io::Result<Body> {
    let file = File::open(path).await?;
    let stream = ReaderStream::with_capacity(file, STREAM_CHUNK_SIZE);
    Ok(Body::from_stream(stream))
}
