use futures::FutureExt;
use shared::Dashboard;
use taskify_loader::{CursorPage, FetchError};
use yew::prelude::*;

use crate::hooks::use_cursor_list::{use_cursor_list, UseCursorListResult, DEFAULT_PAGE_SIZE};
use crate::services::api::ApiClient;

/// Infinite-scroll dashboard list, optionally filtered by a title search.
/// A changed search term throws away the accumulated list and starts over
/// from the first page.
#[hook]
pub fn use_dashboards(
    api_client: &ApiClient,
    search: Option<String>,
) -> UseCursorListResult<Dashboard> {
    let api_client = api_client.clone();
    let search_key = search.clone();

    use_cursor_list(
        move |after| {
            let api_client = api_client.clone();
            let search = search.clone();
            async move {
                let response = api_client
                    .list_dashboards(after, Some(DEFAULT_PAGE_SIZE), search.as_deref())
                    .await
                    .map_err(FetchError::transient)?;
                Ok(CursorPage {
                    items: response.dashboards,
                    next_cursor: response.pagination.next_cursor,
                })
            }
            .boxed_local()
        },
        search_key,
        true,
    )
}
