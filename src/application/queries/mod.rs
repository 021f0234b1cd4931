pub mod audit;
pub mod ideas;
pub mod notifications;
pub mod users;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::cursor::PageCursor;

fn decode_cursor(cursor: Option<&str>) -> ApplicationResult<Option<PageCursor>> {
    cursor
        .filter(|token| !token.is_empty())
        .map(|token| PageCursor::decode(token).map_err(ApplicationError::from))
        .transpose()
}
