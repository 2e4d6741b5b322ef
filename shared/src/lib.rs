use serde::{Deserialize, Serialize};
use std::fmt;

/// A kanban dashboard (board) owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: u64,
    /// Display title of the board (max 64 characters)
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Display name of the owning user
    pub owner: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// An invitation for a user to join a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: u64,
    /// ID of the dashboard this invitation grants access to
    pub dashboard_id: u64,
    /// Email address the invitation was sent to
    pub email: String,
    pub status: InvitationStatus,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Lifecycle status of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvitationStatus::Pending => write!(f, "pending"),
            InvitationStatus::Accepted => write!(f, "accepted"),
            InvitationStatus::Declined => write!(f, "declined"),
        }
    }
}

/// A comment left on a task card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    /// ID of the task this comment belongs to
    pub task_id: u64,
    /// Display name of the comment author
    pub author: String,
    /// Comment body (max 1024 characters)
    pub body: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// A user who has access to a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMember {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
}

/// Access level of a board member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    Owner,
    Member,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberRole::Owner => write!(f, "owner"),
            MemberRole::Member => write!(f, "member"),
        }
    }
}

/// Cursor pagination envelope returned by every cursor-paginated list
/// endpoint. `next_cursor` is the id of the last item in the page; the
/// server sends `null` when the page is the final one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub has_more: bool,
    pub next_cursor: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardListRequest {
    /// Cursor for pagination - dashboard ID to start after
    pub after: Option<u64>,
    /// Maximum number of dashboards to return
    pub limit: Option<u32>,
    /// Optional title search filter
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardListResponse {
    pub dashboards: Vec<Dashboard>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationListRequest {
    pub dashboard_id: u64,
    pub after: Option<u64>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationListResponse {
    pub invitations: Vec<Invitation>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentListRequest {
    pub task_id: u64,
    pub after: Option<u64>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
    pub pagination: PaginationInfo,
}

/// Offset-paginated member listing. Unlike the cursor endpoints the server
/// reports the total membership count so clients can render page controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMemberListRequest {
    pub dashboard_id: u64,
    /// 1-indexed page number
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMemberListResponse {
    pub members: Vec<BoardMember>,
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_info_null_cursor_deserializes_as_none() {
        let json = r#"{"has_more": false, "next_cursor": null}"#;
        let info: PaginationInfo = serde_json::from_str(json).unwrap();
        assert!(!info.has_more);
        assert_eq!(info.next_cursor, None);
    }

    #[test]
    fn dashboard_list_response_round_trips() {
        let response = DashboardListResponse {
            dashboards: vec![Dashboard {
                id: 7,
                title: "Launch plan".to_string(),
                description: None,
                owner: "dana".to_string(),
                created_at: "2026-01-15T09:30:00Z".to_string(),
            }],
            pagination: PaginationInfo {
                has_more: true,
                next_cursor: Some(7),
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        let parsed: DashboardListResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
    }

    #[test]
    fn member_role_display() {
        assert_eq!(MemberRole::Owner.to_string(), "owner");
        assert_eq!(MemberRole::Member.to_string(), "member");
    }
}
