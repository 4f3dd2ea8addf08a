//! HTTP utilities for request/response handling and CORS

use lambda_http::http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ApiError;

/// Cross-origin headers attached to every response
pub const CORS_HEADERS: [(&str, &str); 4] = [
    (
        "access-control-allow-headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "*"),
    ("accept-version", "*"),
];

/// Wrap a status code and payload into the response envelope.
///
/// Never fails: an unknown status becomes 500 and a payload that cannot be
/// serialized is replaced by an error object.
pub fn json_response<T: Serialize + ?Sized>(status: u16, payload: &T) -> Response<Body> {
    let body = serde_json::to_string(payload)
        .unwrap_or_else(|e| json!({ "error": format!("Could not serialize response: {}", e) }).to_string());

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let headers = response.headers_mut();
    for (key, value) in CORS_HEADERS {
        headers.insert(HeaderName::from_static(key), HeaderValue::from_static(value));
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    response
}

/// Build an error response carrying `message` as `{"error": message}`
pub fn error_response(status: u16, message: &str) -> Response<Body> {
    json_response(status, &json!({ "error": message }))
}

/// Report an [`ApiError`] with its own status code
pub fn api_error_response(err: &ApiError) -> Response<Body> {
    error_response(err.status_code(), &err.to_string())
}

/// Deserialize the request body into `T`. An empty body is treated as `{}`.
pub fn parse_json_body<T: DeserializeOwned>(body: &Body) -> Result<T, ApiError> {
    let bytes: &[u8] = body.as_ref();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_str("{}")?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Strip an API Gateway stage prefix (`/Prod/tables` -> `/tables`) and any trailing slash.
pub fn normalize_path<'a>(path: &'a str, stage: Option<&str>) -> &'a str {
    let path = match stage {
        Some(stage) => path
            .strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(stage))
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(path),
        None => path,
    };

    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
