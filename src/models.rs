//! Frontend Models
//!
//! Data structures exchanged with the roster backend and shared by the UI.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The acting leader (current user) who owns the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub id: u32,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    /// Leader already holds a confirmed place/slot
    #[serde(default)]
    pub has_location: bool,
}

/// Externally supplied event settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Minimum number of new friends before the roster can be saved
    pub friends: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { friends: 3 }
    }
}

/// Where an invitee came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Added this session, not yet persisted
    Local,
    /// Sent to the server, id not known until the next load
    Saved,
    /// Loaded from the server
    Remote { id: u32, confirmed: bool },
}

/// A friend on the leader's roster
#[derive(Debug, Clone, PartialEq)]
pub struct Invitee {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub cellphone: String,
    pub invited_by_id: u32,
    pub origin: Origin,
}

impl Invitee {
    pub fn local(draft: NewInvitee, invited_by_id: u32) -> Self {
        Self {
            firstname: draft.firstname,
            lastname: draft.lastname,
            email: draft.email,
            cellphone: draft.cellphone,
            invited_by_id,
            origin: Origin::Local,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self.origin, Origin::Local)
    }

    pub fn remote_id(&self) -> Option<u32> {
        match self.origin {
            Origin::Remote { id, .. } => Some(id),
            Origin::Local | Origin::Saved => None,
        }
    }

    /// `None` until the server has listed the invitee
    pub fn confirmed(&self) -> Option<bool> {
        match self.origin {
            Origin::Remote { confirmed, .. } => Some(confirmed),
            Origin::Local | Origin::Saved => None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    /// Payload for the save request, only for invitees not yet persisted
    pub fn as_new(&self) -> Option<NewInvitee> {
        self.is_new().then(|| NewInvitee {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            cellphone: self.cellphone.clone(),
        })
    }
}

/// Contact data of a friend that has not been saved yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvitee {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub cellphone: String,
}

/// Friend as listed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteInvitee {
    pub id: u32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(default)]
    pub cellphone: String,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub invited_by_id: Option<u32>,
}

impl RemoteInvitee {
    pub fn into_invitee(self, leader_id: u32) -> Invitee {
        Invitee {
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            cellphone: self.cellphone,
            invited_by_id: self.invited_by_id.unwrap_or(leader_id),
            origin: Origin::Remote {
                id: self.id,
                confirmed: self.confirmed,
            },
        }
    }
}

/// Response of the email lookup
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub new_user: Value,
}

impl LookupResponse {
    #[cfg(test)]
    pub fn new_user(is_new: bool) -> Self {
        Self { new_user: Value::Bool(is_new) }
    }

    /// Only a literal `true` counts as an unseen email
    pub fn is_new_user(&self) -> bool {
        self.new_user == Value::Bool(true)
    }
}

/// Response of the batch save, extra fields feed navigation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
}

/// Registration steps this page can hand off to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    PersonalData,
    Friends,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::PersonalData => "/personal-data",
            Route::Friends => "/friends",
        }
    }
}

/// Payload handed to the caller after a successful save when the leader
/// still needs to pick a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryUpdate {
    pub current_route: Route,
    pub new_invitee_count: usize,
    #[serde(flatten)]
    pub server: Map<String, Value>,
}

impl HistoryUpdate {
    pub fn friends_saved(new_invitee_count: usize, mut server: Map<String, Value>) -> Self {
        // `success` already decided the outcome; our own keys must not repeat
        for key in ["success", "currentRoute", "newInviteeCount"] {
            server.remove(key);
        }
        Self {
            current_route: Route::Friends,
            new_invitee_count,
            server,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// User-facing message shown in the notice bar
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_only_true_is_new() {
        let parse = |v: Value| serde_json::from_value::<LookupResponse>(v).unwrap();
        assert!(parse(json!({"new_user": true})).is_new_user());
        assert!(!parse(json!({"new_user": false})).is_new_user());
        assert!(!parse(json!({"new_user": "true"})).is_new_user());
        assert!(!parse(json!({"new_user": 1})).is_new_user());
        assert!(!parse(json!({})).is_new_user());
    }

    #[test]
    fn test_save_response_keeps_extra_fields() {
        let response: SaveResponse =
            serde_json::from_value(json!({"success": true, "group_id": 7, "leader": "x"})).unwrap();
        assert!(response.success);
        assert_eq!(response.extra.get("group_id"), Some(&json!(7)));
        assert!(!response.extra.contains_key("success"));
    }

    #[test]
    fn test_history_update_serializes_flat() {
        let mut server = Map::new();
        server.insert("success".into(), json!(true));
        server.insert("place".into(), json!("north"));
        let update = HistoryUpdate::friends_saved(4, server);

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({"currentRoute": "friends", "newInviteeCount": 4, "place": "north"})
        );
    }

    #[test]
    fn test_history_update_never_repeats_its_own_keys() {
        let mut server = Map::new();
        server.insert("currentRoute".into(), json!("place"));
        server.insert("newInviteeCount".into(), json!(99));
        server.insert("group_id".into(), json!(5));
        let update = HistoryUpdate::friends_saved(2, server);

        let encoded = serde_json::to_string(&update).unwrap();
        assert_eq!(encoded.matches("\"currentRoute\"").count(), 1);
        assert_eq!(encoded.matches("\"newInviteeCount\"").count(), 1);
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            value,
            json!({"currentRoute": "friends", "newInviteeCount": 2, "group_id": 5})
        );
    }

    #[test]
    fn test_saved_invitee_is_neither_new_nor_remote() {
        let mut invitee = Invitee::local(
            NewInvitee {
                firstname: "Ana".into(),
                lastname: "Paz".into(),
                email: "ana@paz.cl".into(),
                cellphone: "912345678".into(),
            },
            3,
        );
        invitee.origin = Origin::Saved;

        assert!(!invitee.is_new());
        assert!(invitee.as_new().is_none());
        assert_eq!(invitee.remote_id(), None);
        assert_eq!(invitee.confirmed(), None);
    }

    #[test]
    fn test_remote_invitee_conversion() {
        let remote: RemoteInvitee = serde_json::from_value(json!({
            "id": 12, "firstname": "Ana", "lastname": "Paz",
            "email": "ana@paz.cl", "cellphone": "912345678", "confirmed": true
        }))
        .unwrap();
        let invitee = remote.into_invitee(3);

        assert!(!invitee.is_new());
        assert_eq!(invitee.remote_id(), Some(12));
        assert_eq!(invitee.confirmed(), Some(true));
        assert_eq!(invitee.invited_by_id, 3);
        assert!(invitee.as_new().is_none());
    }
}
