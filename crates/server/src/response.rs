//! Plain-text response rendering
//!
//! Every non-streaming response has the same shape: a `"<code> <reason>\n"`
//! status line, optionally followed by one human-readable message line with
//! the offending path or code, so failures read cleanly in curl output.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use redeemd_core::ALLOWED_METHODS;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Build a plain-text response for `status`, with an optional explanation
/// line after the status line.
pub fn complain(status: StatusCode, message: Option<String>) -> Response {
    let mut body = format!(
        "{} {}\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
    if let Some(message) = message {
        body.push_str(&message);
        body.push('\n');
    }

    text_response(status, body)
}

/// The fixed `"200 OK\n"` success body used by provisioning
pub fn ok() -> Response {
    complain(StatusCode::OK, None)
}

/// 405 with the `Allow` header the surface supports
pub fn method_not_allowed() -> Response {
    let mut response = complain(StatusCode::METHOD_NOT_ALLOWED, None);
    if let Ok(value) = header::HeaderValue::from_str(ALLOWED_METHODS) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}

fn text_response(status: StatusCode, body: String) -> Response {
    let builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, TEXT_PLAIN);

    builder.body(Body::from(body)).unwrap_or_else(|_| {
        Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::from("500 Internal Server Error\n"))
            .unwrap()
    })
}
