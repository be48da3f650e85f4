//! Scripted in-memory roster backend for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::RosterService;
use crate::error::ApiError;
use crate::models::{DeleteResponse, LookupResponse, NewInvitee, RemoteInvitee, SaveResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Lookup(String),
    List(u32),
    Add(u32, Vec<NewInvitee>),
    Delete(u32, u32),
}

/// Each queue is consumed front-first; an empty queue yields a
/// permissive default answer.
#[derive(Default)]
pub struct FakeRosterService {
    pub lookups: RefCell<VecDeque<Result<LookupResponse, ApiError>>>,
    pub lists: RefCell<VecDeque<Result<Vec<RemoteInvitee>, ApiError>>>,
    pub saves: RefCell<VecDeque<Result<SaveResponse, ApiError>>>,
    pub deletes: RefCell<VecDeque<Result<DeleteResponse, ApiError>>>,
    /// When set, the next call waits here until the sender fires
    pub gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeRosterService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_lookup(&self, response: Result<LookupResponse, ApiError>) {
        self.lookups.borrow_mut().push_back(response);
    }

    pub fn push_list(&self, response: Result<Vec<RemoteInvitee>, ApiError>) {
        self.lists.borrow_mut().push_back(response);
    }

    pub fn push_save(&self, response: Result<SaveResponse, ApiError>) {
        self.saves.borrow_mut().push_back(response);
    }

    pub fn push_delete(&self, response: Result<DeleteResponse, ApiError>) {
        self.deletes.borrow_mut().push_back(response);
    }

    /// Hold the next call until the returned sender is used
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    async fn enter(&self, call: Call) {
        self.calls.borrow_mut().push(call);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

pub fn remote(id: u32, email: &str, confirmed: bool) -> RemoteInvitee {
    RemoteInvitee {
        id,
        firstname: format!("Friend{}", id),
        lastname: "Remote".into(),
        email: email.into(),
        cellphone: "912345678".into(),
        confirmed,
        invited_by_id: None,
    }
}

#[async_trait(?Send)]
impl RosterService for FakeRosterService {
    async fn lookup_by_email(&self, email: &str) -> Result<LookupResponse, ApiError> {
        self.enter(Call::Lookup(email.to_string())).await;
        self.lookups
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(LookupResponse::new_user(true)))
    }

    async fn list_invitees(&self, leader_id: u32) -> Result<Vec<RemoteInvitee>, ApiError> {
        self.enter(Call::List(leader_id)).await;
        self.lists.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn add_invitees(&self, leader_id: u32, invitees: &[NewInvitee]) -> Result<SaveResponse, ApiError> {
        self.enter(Call::Add(leader_id, invitees.to_vec())).await;
        self.saves
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(SaveResponse { success: true, ..Default::default() }))
    }

    async fn delete_invitee(&self, leader_id: u32, invitee_id: u32) -> Result<DeleteResponse, ApiError> {
        self.enter(Call::Delete(leader_id, invitee_id)).await;
        self.deletes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(DeleteResponse { success: true }))
    }
}
