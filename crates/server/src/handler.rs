//! Request dispatch: transport fields in, verdicts out
//!
//! The redeem code travels as the `redeemcode` query parameter, the admin
//! secret as the `X-Admin` header, and new codes as a urlencoded form field.
//! Any path is accepted; the gate decides what it means.

use crate::response::{complain, method_not_allowed, ok};
use crate::stream::file_body;
use axum::body::Body;
use axum::extract::{FromRequest, Query, Request, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::Response;
use axum::{Form, Router};
use percent_encoding::percent_decode_str;
use redeemd_core::{ResourcePath, ADMIN_HEADER, REDEEMCODE_PARAM};
use redeemd_gate::{AuthorizationGate, LookupVerdict, ProvisionVerdict};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Shared per-process state: one gate behind an `Arc`
#[derive(Clone)]
pub struct AppState {
    gate: Arc<AuthorizationGate>,
}

impl AppState {
    #[must_use]
    pub fn new(gate: AuthorizationGate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }
}

/// Build the router. Every path goes through the same dispatcher; there is
/// no route table because the path itself is data, not routing.
pub fn router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

#[derive(Deserialize)]
struct LookupQuery {
    redeemcode: Option<String>,
}

#[derive(Deserialize)]
struct ProvisionForm {
    redeemcode: Option<String>,
}

async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let method = req.method().clone();

    // The dispatcher sees the raw request path, so percent-escapes are
    // undone here; the decoded form is both the store key and the path the
    // resolver joins. An encoded `%2e%2e` decodes to `..` and dies in the
    // resolver's containment check like any other traversal.
    let path = ResourcePath::new(
        percent_decode_str(req.uri().path())
            .decode_utf8_lossy()
            .into_owned(),
    );

    debug!(%method, path = %path, "handling request");

    let response = match method {
        Method::GET => handle_lookup(&state, &path, req.uri(), false).await,
        Method::HEAD => handle_lookup(&state, &path, req.uri(), true).await,
        Method::POST => handle_provision(&state, &path, req).await,
        _ => method_not_allowed(),
    };

    debug!(%method, path = %path, status = response.status().as_u16(), "handled request");
    response
}

async fn handle_lookup(state: &AppState, path: &ResourcePath, uri: &Uri, head: bool) -> Response {
    // A malformed query string carries no usable parameter, so it falls
    // into the missing-parameter outcome rather than a parse error.
    let supplied = Query::<LookupQuery>::try_from_uri(uri)
        .map(|q| q.0.redeemcode)
        .unwrap_or(None);

    match state.gate.lookup(path, supplied.as_deref()) {
        LookupVerdict::MissingParameter => complain(
            StatusCode::BAD_REQUEST,
            Some(format!("Missing request parameter \"{REDEEMCODE_PARAM}\"")),
        ),
        LookupVerdict::NotFound => complain(StatusCode::NOT_FOUND, None),
        LookupVerdict::Unprovisioned => complain(
            StatusCode::BAD_REQUEST,
            Some(format!("File \"{path}\" has no redeem codes")),
        ),
        LookupVerdict::InvalidCode => complain(
            StatusCode::UNAUTHORIZED,
            Some(format!(
                "\"{}\" is not a valid redeemcode for file \"{path}\"",
                supplied.unwrap_or_default()
            )),
        ),
        LookupVerdict::Authorized {
            file,
            len,
            mime,
            filename,
        } => {
            let body = if head {
                Body::empty()
            } else {
                match file_body(&file).await {
                    Ok(body) => body,
                    Err(e) => {
                        // Authorized but unreadable: the file moved between
                        // resolution and open.
                        error!(path = %path, error = %e, "failed to open authorized file");
                        return complain(StatusCode::INTERNAL_SERVER_ERROR, None);
                    }
                }
            };

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime)
                .header(header::CONTENT_LENGTH, len)
                .header(
                    header::CONTENT_DISPOSITION,
                    format!("attachment;filename=\"{filename}\""),
                )
                .body(body)
                .unwrap_or_else(|e| {
                    error!(path = %path, error = %e, "failed to build file response");
                    complain(StatusCode::INTERNAL_SERVER_ERROR, None)
                })
        }
    }
}

async fn handle_provision(state: &AppState, path: &ResourcePath, req: Request) -> Response {
    let admin = req
        .headers()
        .get(ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    // An absent or non-form body simply carries no code; the gate still
    // checks the admin credential first.
    let new_code = match Form::<ProvisionForm>::from_request(req, &()).await {
        Ok(Form(form)) => form.redeemcode,
        Err(_) => None,
    };

    match state.gate.provision(path, admin.as_deref(), new_code.as_deref()) {
        Ok(ProvisionVerdict::AdminUnauthorized) => complain(
            StatusCode::UNAUTHORIZED,
            Some(format!("Missing or invalid admin header \"{ADMIN_HEADER}\"")),
        ),
        Ok(ProvisionVerdict::EmptyCode) => complain(
            StatusCode::BAD_REQUEST,
            Some("Cannot have an empty redeemcode".to_string()),
        ),
        Ok(ProvisionVerdict::DuplicateCode) => complain(
            StatusCode::CONFLICT,
            Some(format!(
                "Redeemcode \"{}\" already exists for file \"{path}\"",
                new_code.unwrap_or_default()
            )),
        ),
        Ok(ProvisionVerdict::Provisioned) => ok(),
        Err(e) => {
            error!(path = %path, error = %e, "store failure during provision");
            complain(StatusCode::INTERNAL_SERVER_ERROR, None)
        }
    }
}
