use serde::Deserialize;

use crate::server::deserializers::deserialize_page;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N` query. Absent or unparsable values fall back to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

pub(crate) fn first_page() -> i64 {
    1
}

/// Returns the items in `[(page - 1) * page_size, page * page_size)`.
///
/// Pages are 1-based. A window past the end, or any page below 1, is empty.
pub fn paginate<T>(page: i64, page_size: usize, items: Vec<T>) -> Vec<T> {
    let Some(Ok(index)) = page.checked_sub(1).map(usize::try_from) else {
        return Vec::new();
    };
    let start = index.saturating_mul(page_size);
    items.into_iter().skip(start).take(page_size).collect()
}
