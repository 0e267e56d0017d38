//! # Request Handlers
//!
//! Axum request handlers for the charge relay.
//!
//! Every dispatcher response is HTTP 200. Callers read the body to learn
//! what happened: a charge envelope, an `{"error": ...}` object, or the
//! plain-text validation failure message.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
            ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ALLOW, CONTENT_TYPE,
            ORIGIN,
        },
        HeaderMap, HeaderValue, Method,
    },
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{ErrorEnvelope, IncomingPayload, PaymentError};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Methods the relay answers
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Preflight cache lifetime (24 hours)
pub const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

/// Plain-text body for payloads missing required fields
pub const VALIDATION_FAILED_BODY: &str = "Input data failed validation";

/// Largest request body accepted (64 KiB); a charge request is a few hundred bytes
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "charge-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Route a request by HTTP method
///
/// - `POST` → validate and forward the charge
/// - `OPTIONS` → CORS preflight
/// - anything else → `{"error":"Unsupported request method: <METHOD>"}`
#[instrument(skip_all, fields(method = %method, request_id = %Uuid::new_v4()))]
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::POST {
        match body {
            Ok(body) => handle_payment(&state, &body).await,
            Err(rejection) => {
                warn!("Failed to read request body: {}", rejection);
                error_response(
                    &state,
                    format!("Error handling request content: {}", rejection.body_text()),
                )
            }
        }
    } else if method == Method::OPTIONS {
        handle_preflight(&headers)
    } else {
        let err = PaymentError::UnsupportedMethod {
            method: method.to_string(),
        };
        warn!("{}", err);
        error_response(&state, err.to_string())
    }
}

/// Validate the JSON body and forward `payment_info` to the provider
async fn handle_payment(state: &AppState, body: &[u8]) -> Response {
    let text = String::from_utf8_lossy(body);

    let payload = match IncomingPayload::parse(&text) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(kind = e.kind(), "Rejecting request body: {}", e);
            return error_response(state, format!("Error handling request content: {}", e));
        }
    };

    let payment_info = match payload.into_payment_info() {
        Ok(info) => info,
        Err(e) => {
            info!(kind = e.kind(), "Payment request failed validation");
            return with_cors(
                state,
                ([(CONTENT_TYPE, "text/plain; charset=utf-8")], VALIDATION_FAILED_BODY)
                    .into_response(),
            );
        }
    };

    match state.forwarder.forward_json(payment_info).await {
        Ok(envelope) => with_cors(
            state,
            ([(CONTENT_TYPE, "application/json")], envelope).into_response(),
        ),
        Err(e) => {
            error!(
                kind = e.kind(),
                provider = state.forwarder.provider_name(),
                "Charge forwarding failed: {}",
                e
            );
            error_response(state, format!("Error handling request content: {}", e))
        }
    }
}

/// Answer an `OPTIONS` request
///
/// A browser preflight carries `Origin`, `Access-Control-Request-Method`
/// and `Access-Control-Request-Headers`; anything else is a plain
/// capability query and only gets an `Allow` header.
pub fn handle_preflight(headers: &HeaderMap) -> Response {
    let is_cors_preflight = [
        ORIGIN,
        ACCESS_CONTROL_REQUEST_METHOD,
        ACCESS_CONTROL_REQUEST_HEADERS,
    ]
    .iter()
    .all(|name| headers.contains_key(name));

    if is_cors_preflight {
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE_SECS),
        ]
        .into_response()
    } else {
        [(ALLOW, ALLOWED_METHODS)].into_response()
    }
}

// =============================================================================
// Response helpers
// =============================================================================

fn error_response(state: &AppState, message: String) -> Response {
    with_cors(state, Json(ErrorEnvelope::new(message)).into_response())
}

fn with_cors(state: &AppState, mut response: Response) -> Response {
    if state.config.cors_enabled {
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
    response
}
