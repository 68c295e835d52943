//! Pure helpers: URL parsing, error body (no HTTP, no status logic).

/// Last path segment of a request URL, i.e. the request id.
pub(crate) fn request_id_from_url(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Error message from a non-2xx body.
///
/// Expected format: `{"error": "..."}`; falls back to the first 200
/// characters of the raw body, then to the HTTP status text.
pub(crate) fn error_body_message(body: &str, status_text: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("error").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        status_text.to_string()
    } else {
        body.chars().take(200).collect()
    }
}
