use futures::FutureExt;
use shared::Comment;
use taskify_loader::{CursorPage, FetchError};
use yew::prelude::*;

use crate::hooks::use_cursor_list::{use_cursor_list, UseCursorListResult, DEFAULT_PAGE_SIZE};
use crate::services::api::ApiClient;

/// Infinite-scroll comment thread for one task card. Opening a different
/// card refreshes from the first page.
#[hook]
pub fn use_comments(api_client: &ApiClient, task_id: u64) -> UseCursorListResult<Comment> {
    let api_client = api_client.clone();

    use_cursor_list(
        move |after| {
            let api_client = api_client.clone();
            async move {
                let response = api_client
                    .list_comments(task_id, after, Some(DEFAULT_PAGE_SIZE))
                    .await
                    .map_err(FetchError::transient)?;
                Ok(CursorPage {
                    items: response.comments,
                    next_cursor: response.pagination.next_cursor,
                })
            }
            .boxed_local()
        },
        task_id,
        true,
    )
}
