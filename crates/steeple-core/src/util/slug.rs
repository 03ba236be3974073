//! Slug generation for object-store keys and download file names.
//!
//! ## Summary
//! Uploaded images and exported files are named after user-supplied titles.
//! Slugs keep those names lowercase ASCII with single hyphens so they are
//! safe in URLs, on disk and in `Content-Disposition` headers.

/// Placeholder used when a name has no usable characters.
pub const EMPTY_SLUG: &str = "untitled";

/// Generate a URL-safe slug from a name.
///
/// Lowercases, maps every non-alphanumeric ASCII character to a hyphen,
/// collapses runs and trims the edges. Names with nothing left fall back
/// to [`EMPTY_SLUG`].
///
/// Examples:
/// - "Easter Sunday 2024" -> "easter-sunday-2024"
/// - "Pastor's Welcome.JPG" -> "pastor-s-welcome-jpg"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Split a file name into a slugged stem and a lowercase extension.
///
/// The extension is only kept when it is short and alphanumeric.
#[must_use]
pub fn slug_file_name(file_name: &str) -> (String, Option<String>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            (generate_slug(stem), Some(ext.to_ascii_lowercase()))
        }
        _ => (generate_slug(file_name), None),
    }
}
