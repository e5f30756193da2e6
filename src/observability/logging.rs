//! Logging utilities with sensitive data redaction.

/// Maximum number of response-body bytes written to a log line
pub const MAX_LOGGED_BODY_BYTES: usize = 4096;

/// Redact a token, keeping a short prefix for correlation
pub fn redact_token(token: &str) -> String {
    match token.char_indices().nth(8) {
        Some((idx, _)) if token.len() > 12 => format!("{}...[REDACTED]", &token[..idx]),
        _ => "[REDACTED]".to_string(),
    }
}

/// Render a response body for a log line: lossy UTF-8, capped length
pub fn truncate_body(body: &[u8]) -> String {
    if body.len() <= MAX_LOGGED_BODY_BYTES {
        return String::from_utf8_lossy(body).into_owned();
    }
    let mut text = String::from_utf8_lossy(&body[..MAX_LOGGED_BODY_BYTES]).into_owned();
    text.push_str(&format!("...[{} bytes truncated]", body.len() - MAX_LOGGED_BODY_BYTES));
    text
}
