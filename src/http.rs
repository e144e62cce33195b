/// Trims an error response body down to something fit for a log line. HTML
/// bodies (login pages, proxy error pages) carry no useful text and are
/// replaced by a hint.
pub(crate) fn summarize_body(body: &str) -> String {
    if body.starts_with("<!DOCTYPE") || body.starts_with("<html") {
        return "HTML response (a client certificate may be required)".to_string();
    }

    let mut message: String = body.chars().take(100).collect();
    if message.len() < body.len() {
        message.push_str("...");
    }

    message
}
