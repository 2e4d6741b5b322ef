use futures::FutureExt;
use shared::BoardMember;
use taskify_loader::{CountedPage, FetchError};
use yew::prelude::*;

use crate::hooks::use_cursor_list::DEFAULT_PAGE_SIZE;
use crate::hooks::use_page_list::{use_page_list, UsePageListResult};
use crate::services::api::ApiClient;

/// Classic page-by-page member list for one dashboard, with prev/next
/// navigation. Switching dashboards snaps back to page 1.
#[hook]
pub fn use_board_members(
    api_client: &ApiClient,
    dashboard_id: u64,
) -> UsePageListResult<BoardMember> {
    let api_client = api_client.clone();

    use_page_list(
        move |page| {
            let api_client = api_client.clone();
            async move {
                let response = api_client
                    .list_board_members(dashboard_id, page, DEFAULT_PAGE_SIZE)
                    .await
                    .map_err(FetchError::transient)?;
                Ok(CountedPage {
                    items: response.members,
                    total_count: response.total_count,
                })
            }
            .boxed_local()
        },
        DEFAULT_PAGE_SIZE,
        dashboard_id,
        true,
    )
}
