use futures::FutureExt;
use shared::Invitation;
use taskify_loader::{CursorPage, FetchError};
use yew::prelude::*;

use crate::hooks::use_cursor_list::{use_cursor_list, UseCursorListResult, DEFAULT_PAGE_SIZE};
use crate::services::api::ApiClient;

/// Infinite-scroll invitation list for one dashboard. Switching dashboards
/// resets the accumulated list.
#[hook]
pub fn use_invitations(api_client: &ApiClient, dashboard_id: u64) -> UseCursorListResult<Invitation> {
    let api_client = api_client.clone();

    use_cursor_list(
        move |after| {
            let api_client = api_client.clone();
            async move {
                let response = api_client
                    .list_invitations(dashboard_id, after, Some(DEFAULT_PAGE_SIZE))
                    .await
                    .map_err(FetchError::transient)?;
                Ok(CursorPage {
                    items: response.invitations,
                    next_cursor: response.pagination.next_cursor,
                })
            }
            .boxed_local()
        },
        dashboard_id,
        true,
    )
}
