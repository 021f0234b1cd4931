use crate::domain::cursor::PageCursor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        let has_more = next_cursor.is_some();
        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    /// Converts repository output, encoding the keyset position for the client.
    pub fn from_domain<D>(items: Vec<D>, next: Option<PageCursor>) -> Self
    where
        T: From<D>,
    {
        Self::new(
            items.into_iter().map(T::from).collect(),
            next.map(|c| c.encode()),
        )
    }
}

/// `0` selects the default; anything above the maximum is clamped.
pub fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_PAGE_LIMIT,
        Some(limit) => limit.min(MAX_PAGE_LIMIT),
    }
}
