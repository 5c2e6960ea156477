/// Constants used throughout the redeemd codebase
// Request surface; the provision form field reuses the query parameter name
pub const REDEEMCODE_PARAM: &str = "redeemcode";
pub const ADMIN_HEADER: &str = "X-Admin";

// Methods advertised on a 405 response
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST";

// Environment variable names
pub const ADMIN_KEY_VAR: &str = "REDEEMD_ADMIN_KEY";

// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

// File bytes are streamed in chunks of this size; the whole file is never
// held in memory.
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

// Fallback content type when the extension is unknown
pub const OCTET_STREAM: &str = "application/octet-stream";
