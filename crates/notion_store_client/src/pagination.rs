//! Cursor pagination driven to completion.
//!
//! Every listing endpoint of the store returns up to [`PAGE_SIZE`] items plus
//! an opaque cursor for the next page. Callers must never assume a single
//! page holds everything, so both container discovery and record queries go
//! through [`collect_paginated`].

use crate::StoreError;

/// Maximum number of items requested per page.
pub const PAGE_SIZE: u32 = 100;

/// One page of a paginated listing response.
#[derive(Debug, serde::Deserialize)]
pub struct PageOf<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Fetch pages starting from no cursor, feeding each returned cursor back in,
/// until the store signals there are no further pages. Accumulates all items
/// in response order.
pub async fn collect_paginated<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, StoreError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PageOf<T>, StoreError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = fetch_page(cursor.take()).await?;
        items.extend(page.results);
        match (page.has_more, page.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => return Ok(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn walks_every_page_and_threads_the_cursor() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let items = collect_paginated(move |cursor| {
            let c = c.clone();
            async move {
                match c.fetch_add(1, Ordering::SeqCst) {
                    0 => {
                        assert!(cursor.is_none());
                        Ok(PageOf {
                            results: vec![1, 2],
                            has_more: true,
                            next_cursor: Some("c1".into()),
                        })
                    }
                    1 => {
                        assert_eq!(cursor.as_deref(), Some("c1"));
                        Ok(PageOf {
                            results: vec![3],
                            has_more: false,
                            next_cursor: None,
                        })
                    }
                    _ => panic!("fetched past the final page"),
                }
            }
        })
        .await
        .expect("pages");
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stops_when_has_more_is_set_but_cursor_is_absent() {
        let items = collect_paginated(|_cursor| async {
            Ok(PageOf {
                results: vec!["only"],
                has_more: true,
                next_cursor: None,
            })
        })
        .await
        .expect("pages");
        assert_eq!(items, vec!["only"]);
    }

    #[tokio::test]
    async fn single_empty_page_yields_empty_vec() {
        let items: Vec<u8> = collect_paginated(|_cursor| async {
            Ok(PageOf {
                results: Vec::new(),
                has_more: false,
                next_cursor: None,
            })
        })
        .await
        .expect("pages");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn first_page_error_propagates() {
        let err = collect_paginated::<u8, _, _>(|_cursor| async {
            Err(StoreError::Api {
                status: 500,
                body: "boom".into(),
            })
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 500, .. }));
    }
}
