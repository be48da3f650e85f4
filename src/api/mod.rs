//! Remote Roster Service
//!
//! Contract for the backend that owns friend records, plus the HTTP
//! implementation used in the browser.

mod http;
mod friends;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{DeleteResponse, LookupResponse, NewInvitee, RemoteInvitee, SaveResponse};

pub use friends::{resolve_base_url, HttpRosterService};

/// Backend operations consumed by the roster workflow.
///
/// Every call may fail with an [`ApiError`]; an application-level refusal
/// is a successful call carrying `success: false`.
#[async_trait(?Send)]
pub trait RosterService {
    /// Whether `email` already belongs to a registered user
    async fn lookup_by_email(&self, email: &str) -> Result<LookupResponse, ApiError>;

    async fn list_invitees(&self, leader_id: u32) -> Result<Vec<RemoteInvitee>, ApiError>;

    async fn add_invitees(&self, leader_id: u32, invitees: &[NewInvitee]) -> Result<SaveResponse, ApiError>;

    async fn delete_invitee(&self, leader_id: u32, invitee_id: u32) -> Result<DeleteResponse, ApiError>;
}
