use crate::error::{Result, WsawError};
use url::Url;

/// Map a non-success status to a short reason.
pub(super) fn check_status(status_code: reqwest::StatusCode) -> std::result::Result<(), String> {
    if status_code.is_success() {
        return Ok(());
    }
    let label = match status_code {
        reqwest::StatusCode::TOO_MANY_REQUESTS => "rate limited",
        reqwest::StatusCode::FORBIDDEN => "forbidden",
        reqwest::StatusCode::NOT_FOUND => "not found",
        reqwest::StatusCode::UNAUTHORIZED => "unauthorized",
        reqwest::StatusCode::BAD_REQUEST => "bad request",
        s if s.is_server_error() => "server error",
        _ => "unknown error",
    };
    Err(format!("status {} ({})", status_code.as_u16(), label))
}

/// Decode the page body as UTF-8. Invalid sequences become U+FFFD so one bad
/// byte costs a character, not the page.
pub(super) fn decode_body(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::debug!("body is not valid utf-8 ({}), decoding lossily", e.utf8_error());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// Parse an absolute http(s) URL.
pub fn parse_http_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| WsawError::InvalidUrl(trimmed.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(WsawError::InvalidUrl(trimmed.to_string())),
    }
}

/// Resolve a possibly relative or protocol-relative reference against `base`.
pub fn resolve_reference(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim().trim_matches('"').trim_matches('\'').trim();
    if href.is_empty() {
        return None;
    }

    let url = if href.starts_with("//") {
        Url::parse(&format!("{}:{}", base.scheme(), href)).ok()?
    } else {
        Url::parse(href).ok().or_else(|| base.join(href).ok())?
    };

    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}
