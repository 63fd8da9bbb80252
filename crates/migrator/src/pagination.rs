//! Draining of offset/size paginated listings.

use std::collections::VecDeque;
use std::future::Future;

use futures::{Stream, TryStreamExt, stream};
use platform::Page;
use tracing::debug;

use crate::Result;

pub const PARTICIPANT_PAGE_SIZE: u32 = 100;
pub const MEMBER_PAGE_SIZE: u32 = 100;
pub const SUBMISSION_PAGE_SIZE: u32 = 25;

struct Cursor<T, F> {
    fetch: F,
    offset: u32,
    size: u32,
    buffer: VecDeque<T>,
    exhausted: bool,
}

/// Lazily walks a listing page by page. `fetch(offset, size)` is called with
/// offsets 0, size, 2*size, ... until the offset reaches the reported total or
/// a page comes back empty. Fetch errors end the stream; nothing is retried.
pub fn paginate<T, F, Fut>(size: u32, fetch: F) -> impl Stream<Item = Result<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let cursor = Cursor {
        fetch,
        offset: 0,
        size: size.max(1),
        buffer: VecDeque::new(),
        exhausted: false,
    };

    stream::try_unfold(cursor, |mut cursor| async move {
        loop {
            if let Some(item) = cursor.buffer.pop_front() {
                return Ok(Some((item, cursor)));
            }
            if cursor.exhausted {
                return Ok(None);
            }

            let page = (cursor.fetch)(cursor.offset, cursor.size).await?;
            debug!(
                "Fetched page at offset {}: {} item(s) of {}",
                cursor.offset,
                page.items.len(),
                page.total
            );

            cursor.offset = cursor.offset.saturating_add(cursor.size);
            if page.items.is_empty() || cursor.offset >= page.total {
                cursor.exhausted = true;
            }
            cursor.buffer.extend(page.items);
        }
    })
}

/// Drains the whole listing into memory, preserving server order.
pub async fn fetch_all<T, F, Fut>(size: u32, fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    paginate(size, fetch).try_collect().await
}
