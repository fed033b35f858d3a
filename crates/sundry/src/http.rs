//! Small HTTP-related helpers, no client or server included

use sundry_core::{Error, Result};
use url::Url;

/// The official W3C name of a status code
///
/// ```
/// use sundry::http::status_text;
///
/// assert_eq!(status_text(404).unwrap(), "Not Found");
/// assert!(status_text(299).is_err());
/// ```
pub fn status_text(code: u16) -> Result<&'static str> {
    let text = match code {
        100 => "Continue",
        101 => "Switching Protocols",

        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",

        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",

        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Request Entity Too Large",
        414 => "Request-URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Requested Range Not Satisfiable",
        417 => "Expectation Failed",

        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",

        _ => return Err(Error::UnknownStatus { code }),
    };
    Ok(text)
}

/// Like [`status_text`], with a fallback label for unknown codes
pub fn status_text_or_unknown(code: u16) -> String {
    match status_text(code) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::warn!(code, "unknown HTTP status code");
            format!("Unknown HTTP status {code}")
        }
    }
}

/// Prepend `http://` where the protocol scheme is missing
///
/// ```
/// use sundry::http::make_url;
///
/// assert_eq!(make_url("www.unitracc.de").unwrap().as_str(), "http://www.unitracc.de/");
/// assert_eq!(make_url("//www.unitracc.de").unwrap().as_str(), "http://www.unitracc.de/");
/// assert_eq!(make_url("https://www.unitracc.de").unwrap().scheme(), "https");
/// ```
pub fn make_url(s: &str) -> Result<Url> {
    let candidate = if s.starts_with("//") {
        format!("http:{s}")
    } else if !s.contains("://") {
        format!("http://{s}")
    } else {
        s.to_string()
    };
    Url::parse(&candidate)
        .map_err(|e| Error::invalid_value("url", format!("{s:?}: {e}")))
}

/// The hostname of a URL, e.g. to pick the matching subportal
///
/// Degenerate inputs like an empty port (`host:/path`) are tolerated;
/// bare hostnames work too.
///
/// ```
/// use sundry::http::extract_hostname;
///
/// assert_eq!(extract_hostname("http://unitracc.de/akademie").unwrap(), "unitracc.de");
/// assert_eq!(extract_hostname("http://aqwa-academy.net:/file/path").unwrap(), "aqwa-academy.net");
/// assert_eq!(extract_hostname("betonquali.de").unwrap(), "betonquali.de");
/// assert!(extract_hostname("/akademie").is_err());
/// ```
pub fn extract_hostname(url: &str) -> Result<String> {
    let missing = || Error::MissingHost {
        input: url.to_string(),
    };
    if let Ok(parsed) = make_url(url) {
        if let Some(host) = parsed.host_str() {
            return Ok(host.to_string());
        }
    }
    // an empty port makes strict parsers stumble
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split('/').next().unwrap_or("");
    let host = authority.split(':').next().unwrap_or("");
    if host.is_empty() {
        return Err(missing());
    }
    Ok(host.to_string())
}
