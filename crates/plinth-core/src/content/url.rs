//! URL normalization and preview derivation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a Google-Drive "view" share link and captures the file id.
static DRIVE_VIEW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://drive\.google\.com/file/d/([A-Za-z0-9_-]+)/view")
        .expect("drive view pattern is valid")
});

/// Prefixes `https://` onto any URL lacking an explicit scheme.
///
/// Idempotent: an already-schemed URL is returned unchanged.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Derives the preview URL for a (normalized) document or project URL.
///
/// Drive "view" share links are rewritten to their embeddable "preview"
/// form; every other URL previews as itself.
pub fn derive_preview_url(url: &str) -> String {
    if let Some(caps) = DRIVE_VIEW_RE.captures(url) {
        format!("https://drive.google.com/file/d/{}/preview", &caps[1])
    } else {
        url.to_string()
    }
}
