//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of an app or category slug.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Maximum length of a tracked page path.
pub const MAX_PATH_LENGTH: usize = 2048;

/// Maximum length of a trimmed search term.
pub const MAX_SEARCH_LENGTH: usize = 100;

lazy_static::lazy_static! {
    /// Lowercase ASCII words separated by single hyphens.
    pub static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Returns true when `slug` is a well-formed URL slug.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= MAX_SLUG_LENGTH && SLUG_REGEX.is_match(slug)
}

/// Validates a category or app slug.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message = Some(
            "Slug must be lowercase letters, digits and single hyphens (max 100 characters)"
                .into(),
        );
        Err(err)
    }
}

/// Validates an optional slug filter. A blank value means no filter.
pub fn validate_slug_filter(slug: &str) -> Result<(), ValidationError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Ok(());
    }
    validate_slug(slug)
}

/// Validates a search term by its trimmed length.
pub fn validate_search_term(term: &str) -> Result<(), ValidationError> {
    if term.trim().chars().count() > MAX_SEARCH_LENGTH {
        let mut err = ValidationError::new("search_length");
        err.message = Some("Search term must be at most 100 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a tracked page path: non-blank and at most 2048 characters.
pub fn validate_page_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        let mut err = ValidationError::new("path_required");
        err.message = Some("Path must not be empty".into());
        return Err(err);
    }

    if path.chars().count() > MAX_PATH_LENGTH {
        let mut err = ValidationError::new("path_length");
        err.message = Some("Path must be at most 2048 characters".into());
        return Err(err);
    }

    Ok(())
}
