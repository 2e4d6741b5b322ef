pub mod use_board_members;
pub mod use_comments;
pub mod use_cursor_list;
pub mod use_dashboards;
pub mod use_invitations;
pub mod use_page_list;
pub mod use_visible;

pub use use_board_members::use_board_members;
pub use use_comments::use_comments;
pub use use_cursor_list::{use_cursor_list, UseCursorListActions, UseCursorListResult};
pub use use_dashboards::use_dashboards;
pub use use_invitations::use_invitations;
pub use use_page_list::{use_page_list, UsePageListActions, UsePageListResult};
pub use use_visible::use_visible;
