//! UI Components
//!
//! Leptos components for the friends step.

mod invitee_form;
mod roster_list;
mod delete_confirm_dialog;
mod notice_bar;
mod friends_page;
mod activity_log;

pub use invitee_form::InviteeForm;
pub use roster_list::RosterList;
pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use notice_bar::NoticeBar;
pub use friends_page::FriendsPage;
pub use activity_log::ActivityLog;
