// src/domain/cursor.rs
use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position for lists ordered by `(created_at DESC, id DESC)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl PageCursor {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.created_at.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::Validation("invalid cursor token".into());

        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (created_at_s, id_s) = raw.split_once('|').ok_or_else(invalid)?;
        let created_at = DateTime::parse_from_rfc3339(created_at_s)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id_s.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(created_at, id))
    }

    /// True when a row at `(created_at, id)` sorts strictly after this cursor
    /// in newest-first order.
    pub fn precedes(&self, created_at: DateTime<Utc>, id: i64) -> bool {
        (created_at, id) < (self.created_at, self.id)
    }
}

/// Trims a `limit + 1` fetch down to `limit` rows and derives the cursor for
/// the next page from the last row kept.
pub fn split_page<T>(
    mut rows: Vec<T>,
    limit: u32,
    position: impl Fn(&T) -> PageCursor,
) -> (Vec<T>, Option<PageCursor>) {
    let limit = limit as usize;
    if rows.len() <= limit {
        return (rows, None);
    }
    rows.truncate(limit);
    let next = rows.last().map(position);
    (rows, next)
}
