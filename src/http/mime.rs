//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension, and decides
//! whether a type travels as text or as base64.

use std::path::Path;

/// Fallback for extensions not in the table
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use certdir::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(get_content_type(Some("woff2")), "font/woff2");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(extension) = extension else {
        return OCTET_STREAM;
    };
    match extension.to_ascii_lowercase().as_str() {
        // Documents
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "txt" => "text/plain; charset=utf-8",
        "csv" => "text/csv; charset=utf-8",
        "xml" => "application/xml",

        // Scripts and data
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "webmanifest" => "application/manifest+json",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Downloads
        "pdf" => "application/pdf",
        "asc" => "application/pgp-keys",

        _ => OCTET_STREAM,
    }
}

/// Content type for a file path
pub fn content_type_for_path(path: &str) -> &'static str {
    get_content_type(Path::new(path).extension().and_then(|e| e.to_str()))
}

/// Textual types are sent as UTF-8; everything else is base64-encoded
pub fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/")
        || content_type.contains("javascript")
        || content_type.contains("json")
}

pub fn is_html(content_type: &str) -> bool {
    content_type.starts_with("text/html")
}

pub fn is_json(content_type: &str) -> bool {
    content_type.contains("json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(get_content_type(Some("css")), "text/css; charset=utf-8");
        assert_eq!(
            get_content_type(Some("js")),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_content_type(Some("json")), "application/json");
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("PNG")), "image/png");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), OCTET_STREAM);
        assert_eq!(get_content_type(None), OCTET_STREAM);
        assert_eq!(content_type_for_path("LICENSE"), OCTET_STREAM);
    }

    #[test]
    fn test_content_type_for_nested_path() {
        assert_eq!(content_type_for_path("assets/app.3f9a.js"), "application/javascript; charset=utf-8");
        assert_eq!(content_type_for_path("img/logo.svg"), "image/svg+xml");
    }

    #[test]
    fn test_is_textual() {
        assert!(is_textual("text/css; charset=utf-8"));
        assert!(is_textual("application/javascript; charset=utf-8"));
        assert!(is_textual("application/manifest+json"));
        assert!(!is_textual("image/svg+xml"));
        assert!(!is_textual("image/png"));
        assert!(!is_textual(OCTET_STREAM));
    }
}
