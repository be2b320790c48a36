//! Walks every page of a paged listing and concatenates the results.
//!
//! Page 1 is always fetched first because it carries the page count. The
//! remaining pages are fetched one at a time, or with up to
//! `max_concurrent` requests in flight. Either way the output is ordered by
//! page number, then by server order within a page. The first failing page
//! fails the whole walk; pages already fetched are dropped.

use std::collections::BTreeMap;
use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::ApiResult;
use crate::types::Page;

pub async fn collect_all_pages<T, F, Fut>(fetch: F, max_concurrent: usize) -> ApiResult<Vec<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = ApiResult<Page<T>>>,
{
    let first = fetch(1).await?;
    let total = first.info.pages;
    let mut collected = first.results;
    if total <= 1 {
        return Ok(collected);
    }

    tracing::debug!(pages = total, max_concurrent, "walking remaining pages");

    if max_concurrent <= 1 {
        for number in 2..=total {
            collected.extend(fetch(number).await?.results);
        }
        return Ok(collected);
    }

    let fetch = &fetch;
    let by_number: BTreeMap<u32, Vec<T>> = stream::iter(2..=total)
        .map(|number| async move { fetch(number).await.map(|page| (number, page.results)) })
        .buffer_unordered(max_concurrent)
        .try_collect()
        .await?;

    for (_, results) in by_number {
        collected.extend(results);
    }
    Ok(collected)
}
