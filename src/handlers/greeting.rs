//! Hello-world endpoint.
use serde_json::{Value, json};

/// Status and body for a request to the greeting function.
pub fn handle_greeting(method: &str, path: &str) -> (u16, Value) {
    if method.eq_ignore_ascii_case("GET") && path == "/hello" {
        return (200, json!({ "statusCode": 200, "message": "Hello from Lambda" }));
    }

    (
        400,
        json!({
            "statusCode": 400,
            "message": format!(
                "Bad request syntax or unsupported method. Request path: {}. HTTP method: {}",
                path, method
            ),
        }),
    )
}
