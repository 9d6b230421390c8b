//! Limit/offset pagination utilities.

use thiserror::Error;

/// Largest page any catalog query will return.
pub const MAX_LIMIT: i64 = 1000;

/// Error type for window resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("limit must be between 1 and {max}, got {value}")]
    LimitOutOfRange { value: i64, max: i64 },
    #[error("offset must be non-negative, got {0}")]
    NegativeOffset(i64),
}

/// A validated limit/offset pair.
///
/// Out-of-range input is rejected rather than clamped so callers notice
/// malformed pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

impl Window {
    /// Resolves optional limit/offset values, applying `default_limit` when
    /// no limit is given and `0` when no offset is given.
    pub fn resolve(
        limit: Option<i64>,
        offset: Option<i64>,
        default_limit: i64,
    ) -> Result<Self, WindowError> {
        let limit = check_limit(limit.unwrap_or(default_limit))?;
        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(WindowError::NegativeOffset(offset));
        }
        Ok(Self { limit, offset })
    }

    /// Index range of this window over a slice of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.offset as usize).min(len);
        let end = start.saturating_add(self.limit as usize).min(len);
        start..end
    }
}

/// Validates a bare limit (used where no offset applies).
pub fn check_limit(limit: i64) -> Result<i64, WindowError> {
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(WindowError::LimitOutOfRange {
            value: limit,
            max: MAX_LIMIT,
        })
    }
}
