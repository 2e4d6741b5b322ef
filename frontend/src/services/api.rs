use gloo::net::http::Request;
use shared::{
    BoardMemberListResponse, CommentListResponse, DashboardListResponse, InvitationListResponse,
};

/// API client for communicating with the Taskify backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// List the current user's dashboards, newest first
    pub async fn list_dashboards(
        &self,
        after: Option<u64>,
        limit: Option<u32>,
        search: Option<&str>,
    ) -> Result<DashboardListResponse, String> {
        let query = list_query(after, limit, search);
        let url = format!("{}/api/dashboards{}", self.base_url, query);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<DashboardListResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse dashboards: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch dashboards: {}", e)),
        }
    }

    /// List pending and settled invitations for a dashboard
    pub async fn list_invitations(
        &self,
        dashboard_id: u64,
        after: Option<u64>,
        limit: Option<u32>,
    ) -> Result<InvitationListResponse, String> {
        let query = list_query(after, limit, None);
        let url = format!(
            "{}/api/dashboards/{}/invitations{}",
            self.base_url, dashboard_id, query
        );

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<InvitationListResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse invitations: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch invitations: {}", e)),
        }
    }

    /// List comments on a task card, oldest first
    pub async fn list_comments(
        &self,
        task_id: u64,
        after: Option<u64>,
        limit: Option<u32>,
    ) -> Result<CommentListResponse, String> {
        let query = list_query(after, limit, None);
        let url = format!("{}/api/tasks/{}/comments{}", self.base_url, task_id, query);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<CommentListResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse comments: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch comments: {}", e)),
        }
    }

    /// List a dashboard's members, one fixed-size page at a time
    pub async fn list_board_members(
        &self,
        dashboard_id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<BoardMemberListResponse, String> {
        let url = format!(
            "{}/api/dashboards/{}/members?page={}&page_size={}",
            self.base_url, dashboard_id, page, page_size
        );

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<BoardMemberListResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse members: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch members: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// TODO: percent-encode the search term once the dashboard filter input ships.
fn list_query(after: Option<u64>, limit: Option<u32>, search: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(after) = after {
        params.push(format!("after={}", after));
    }
    if let Some(limit) = limit {
        params.push(format!("limit={}", limit));
    }
    if let Some(search) = search {
        if !search.is_empty() {
            params.push(format!("search={}", search));
        }
    }
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn empty_query_for_first_page() {
        assert_eq!(list_query(None, None, None), "");
    }

    #[wasm_bindgen_test]
    fn cursor_and_limit_in_query() {
        assert_eq!(list_query(Some(42), Some(10), None), "?after=42&limit=10");
    }

    #[wasm_bindgen_test]
    fn blank_search_is_omitted() {
        assert_eq!(list_query(None, Some(10), Some("")), "?limit=10");
        assert_eq!(
            list_query(None, Some(10), Some("roadmap")),
            "?limit=10&search=roadmap"
        );
    }
}
