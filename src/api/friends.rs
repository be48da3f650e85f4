//! Friend Endpoints
//!
//! HTTP bindings for lookup, listing, saving and removing friends.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Method};
use serde::Serialize;

use super::http::send_json;
use super::RosterService;
use crate::error::ApiError;
use crate::models::{DeleteResponse, LookupResponse, NewInvitee, RemoteInvitee, SaveResponse};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct FriendPayload<'a> {
    #[serde(flatten)]
    invitee: &'a NewInvitee,
    invited_by_id: u32,
    new_user: bool,
}

#[derive(Serialize)]
struct SaveFriendsArgs<'a> {
    friends: Vec<FriendPayload<'a>>,
}

fn save_args(leader_id: u32, invitees: &[NewInvitee]) -> SaveFriendsArgs<'_> {
    SaveFriendsArgs {
        friends: invitees
            .iter()
            .map(|invitee| FriendPayload { invitee, invited_by_id: leader_id, new_user: true })
            .collect(),
    }
}

// ========================
// Endpoints
// ========================

fn lookup_url(base: &str, email: &str) -> String {
    format!("{}/users/lookup?email={}", base, utf8_percent_encode(email, NON_ALPHANUMERIC))
}

fn friends_url(base: &str, leader_id: u32) -> String {
    format!("{}/users/{}/friends", base, leader_id)
}

fn friend_url(base: &str, leader_id: u32, friend_id: u32) -> String {
    format!("{}/users/{}/friends/{}", base, leader_id, friend_id)
}

/// `reqwest` only accepts absolute URLs; a path-only base is joined to
/// the page origin
pub fn resolve_base_url(origin: &str, base_url: &str) -> String {
    if base_url.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), base_url)
    } else {
        base_url.to_string()
    }
}

/// Roster backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpRosterService {
    client: Client,
    base_url: String,
}

impl HttpRosterService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait(?Send)]
impl RosterService for HttpRosterService {
    async fn lookup_by_email(&self, email: &str) -> Result<LookupResponse, ApiError> {
        let url = lookup_url(&self.base_url, email);
        send_json::<(), _>(&self.client, Method::GET, &url, None).await
    }

    async fn list_invitees(&self, leader_id: u32) -> Result<Vec<RemoteInvitee>, ApiError> {
        let url = friends_url(&self.base_url, leader_id);
        send_json::<(), _>(&self.client, Method::GET, &url, None).await
    }

    async fn add_invitees(&self, leader_id: u32, invitees: &[NewInvitee]) -> Result<SaveResponse, ApiError> {
        let url = friends_url(&self.base_url, leader_id);
        let args = save_args(leader_id, invitees);
        send_json(&self.client, Method::POST, &url, Some(&args)).await
    }

    async fn delete_invitee(&self, leader_id: u32, invitee_id: u32) -> Result<DeleteResponse, ApiError> {
        let url = friend_url(&self.base_url, leader_id, invitee_id);
        send_json::<(), _>(&self.client, Method::DELETE, &url, None).await
    }
}
