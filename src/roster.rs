//! Roster Controller
//!
//! Owns the leader's friend list and drives the add / delete / save
//! workflow against the roster backend.
//!
//! State lives behind `Rc<RefCell<_>>` so UI handlers can hold cheap clones
//! while requests are outstanding. A borrow is never held across `.await`;
//! each operation re-checks state after its request resolves.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::api::RosterService;
use crate::error::RosterError;
use crate::form::{FieldName, FormState};
use crate::models::{HistoryUpdate, Invitee, Leader, NewInvitee, Origin};

/// Maximum number of friends per leader
pub const ROSTER_CAP: usize = 10;

/// Network-bound actions, each guarded against re-entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Lookup,
    Submit,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Lookup => write!(f, "Email lookup"),
            Operation::Submit => write!(f, "Save"),
            Operation::Delete => write!(f, "Removal"),
        }
    }
}

impl Operation {
    /// Actions that may not start while this one is in flight
    fn excludes(self) -> &'static [Operation] {
        match self {
            // a friend added mid-save would miss the batch and the reload
            Operation::Lookup => &[Operation::Submit],
            Operation::Submit => &[Operation::Lookup],
            Operation::Delete => &[],
        }
    }
}

/// A server-known friend waiting for the user to confirm removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeletion {
    pub invitee_id: u32,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeletionRequest {
    /// Local friend, dropped right away
    Removed(Invitee),
    /// Server-known friend, needs `confirm_deletion`
    AwaitingConfirmation(PendingDeletion),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Leader already has a place; roster was reloaded from the server
    Reloaded { saved: usize },
    /// Caller should continue to the next registration step
    Continue(HistoryUpdate),
    /// Friends were saved but the roster could not be reloaded
    ReloadFailed { saved: usize },
}

#[derive(Default)]
struct RosterState {
    invitees: Vec<Invitee>,
    form: FormState,
    pending: Option<PendingDeletion>,
    in_flight: HashSet<Operation>,
    load_seq: u64,
    detached: bool,
}

/// Clears the in-flight flag when the operation ends, however it ends
struct FlightGuard {
    state: Rc<RefCell<RosterState>>,
    op: Operation,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.state.borrow_mut().in_flight.remove(&self.op);
    }
}

#[derive(Clone)]
pub struct RosterController {
    leader: Leader,
    service: Rc<dyn RosterService>,
    state: Rc<RefCell<RosterState>>,
}

impl RosterController {
    /// Refuses to operate without an acting leader
    pub fn new(leader: Option<Leader>, service: Rc<dyn RosterService>) -> Result<Self, RosterError> {
        let leader = leader.ok_or(RosterError::NoActingLeader)?;
        Ok(Self {
            leader,
            service,
            state: Rc::new(RefCell::new(RosterState::default())),
        })
    }

    // ========================
    // Reads
    // ========================

    pub fn leader(&self) -> &Leader {
        &self.leader
    }

    pub fn invitees(&self) -> Vec<Invitee> {
        self.state.borrow().invitees.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().invitees.len()
    }

    pub fn new_invitee_count(&self) -> usize {
        self.state.borrow().invitees.iter().filter(|i| i.is_new()).count()
    }

    pub fn form(&self) -> FormState {
        self.state.borrow().form.clone()
    }

    pub fn pending_deletion(&self) -> Option<PendingDeletion> {
        self.state.borrow().pending
    }

    pub fn is_busy(&self, op: Operation) -> bool {
        self.state.borrow().in_flight.contains(&op)
    }

    pub fn busy_operations(&self) -> Vec<Operation> {
        [Operation::Lookup, Operation::Submit, Operation::Delete]
            .into_iter()
            .filter(|op| self.is_busy(*op))
            .collect()
    }

    pub fn can_add(&self) -> bool {
        self.len() < ROSTER_CAP
    }

    /// Save gating for the UI: enough new friends to meet the minimum
    pub fn meets_minimum(&self, minimum: usize) -> bool {
        self.new_invitee_count() >= minimum
    }

    // ========================
    // Form
    // ========================

    pub fn set_value(&self, name: FieldName, raw: impl Into<String>) {
        self.state.borrow_mut().form.set_value(name, raw);
    }

    pub fn mark_touched(&self, name: FieldName) {
        self.state.borrow_mut().form.mark_touched(name);
    }

    // ========================
    // Lifecycle
    // ========================

    /// The owning view is gone; late responses must not touch state
    pub fn detach(&self) {
        self.state.borrow_mut().detached = true;
    }

    fn begin(&self, op: Operation) -> Result<FlightGuard, RosterError> {
        let mut state = self.state.borrow_mut();
        if state.detached {
            return Err(RosterError::Detached);
        }
        if let Some(&other) = op.excludes().iter().find(|other| state.in_flight.contains(*other)) {
            log::debug!("[ROSTER] {} blocked by {} in flight", op, other);
            return Err(RosterError::Busy(other));
        }
        if !state.in_flight.insert(op) {
            log::debug!("[ROSTER] {} already in flight", op);
            return Err(RosterError::Busy(op));
        }
        Ok(FlightGuard { state: self.state.clone(), op })
    }

    fn ensure_attached(&self) -> Result<(), RosterError> {
        if self.state.borrow().detached {
            log::debug!("[ROSTER] dropping response for detached view");
            return Err(RosterError::Detached);
        }
        Ok(())
    }

    // ========================
    // Workflow
    // ========================

    /// Look up the email in the form and, if unseen, append the friend
    /// locally. Returns the new friend's position.
    pub async fn add_invitee(&self) -> Result<usize, RosterError> {
        let _guard = self.begin(Operation::Lookup)?;

        let draft = {
            let mut state = self.state.borrow_mut();
            if state.invitees.len() >= ROSTER_CAP {
                return Err(RosterError::RosterFull(ROSTER_CAP));
            }
            if !state.form.all_valid() {
                state.form.touch_all();
                return Err(RosterError::IncompleteForm);
            }
            let form = &state.form;
            NewInvitee {
                firstname: form.value(FieldName::Firstname).to_string(),
                lastname: form.value(FieldName::Lastname).to_string(),
                email: form.value(FieldName::Email).to_string(),
                cellphone: form.value(FieldName::Cellphone).to_string(),
            }
        };

        let lookup = self.service.lookup_by_email(&draft.email).await;
        self.ensure_attached()?;
        let lookup = lookup.inspect_err(|e| log::warn!("[ROSTER] lookup failed: {}", e))?;

        let mut state = self.state.borrow_mut();
        state.form.reset();
        if !lookup.is_new_user() {
            log::info!("[ROSTER] {} is already registered", draft.email);
            return Err(RosterError::AlreadyRegistered(draft.email));
        }
        if state.invitees.len() >= ROSTER_CAP {
            return Err(RosterError::RosterFull(ROSTER_CAP));
        }
        state.invitees.push(Invitee::local(draft, self.leader.id));
        log::info!("[ROSTER] added local friend, roster size {}", state.invitees.len());
        Ok(state.invitees.len() - 1)
    }

    /// Local friends are removed immediately; server-known ones wait for
    /// `confirm_deletion`.
    pub fn request_deletion(&self, position: usize) -> Result<DeletionRequest, RosterError> {
        let mut state = self.state.borrow_mut();
        for op in [Operation::Delete, Operation::Submit] {
            if state.in_flight.contains(&op) {
                return Err(RosterError::Busy(op));
            }
        }
        let invitee = state
            .invitees
            .get(position)
            .ok_or(RosterError::UnknownInvitee(position))?;

        match invitee.origin {
            Origin::Local => Ok(DeletionRequest::Removed(state.invitees.remove(position))),
            Origin::Saved => Err(RosterError::Unsynced(position)),
            Origin::Remote { id: invitee_id, .. } => {
                let pending = PendingDeletion { invitee_id, position };
                state.pending = Some(pending);
                Ok(DeletionRequest::AwaitingConfirmation(pending))
            }
        }
    }

    pub fn cancel_deletion(&self) {
        self.state.borrow_mut().pending = None;
    }

    /// Ask the server to delete the pending friend. The pending deletion is
    /// cleared whatever the outcome. `None` means the server deleted a
    /// friend that had already left the local roster.
    pub async fn confirm_deletion(&self) -> Result<Option<Invitee>, RosterError> {
        let pending = self.pending_deletion().ok_or(RosterError::NoPendingDeletion)?;
        let _guard = self.begin(Operation::Delete)?;

        let response = self.service.delete_invitee(self.leader.id, pending.invitee_id).await;
        self.ensure_attached()?;

        let mut state = self.state.borrow_mut();
        state.pending = None;
        if !response?.success {
            log::warn!("[ROSTER] server refused to delete friend {}", pending.invitee_id);
            return Err(RosterError::Rejected(Operation::Delete));
        }

        // The roster may have been reloaded while the request was out
        let position = match state.invitees.get(pending.position) {
            Some(invitee) if invitee.remote_id() == Some(pending.invitee_id) => Some(pending.position),
            _ => state
                .invitees
                .iter()
                .position(|invitee| invitee.remote_id() == Some(pending.invitee_id)),
        };
        match position {
            Some(position) => Ok(Some(state.invitees.remove(position))),
            None => {
                log::info!("[ROSTER] deleted friend {} was already off the roster", pending.invitee_id);
                Ok(None)
            }
        }
    }

    /// Send every local friend to the server. The minimum-size rule is the
    /// caller's to enforce. Once the server accepts the batch its friends
    /// are no longer new, even if the reload that follows fails.
    pub async fn submit(&self) -> Result<SubmitOutcome, RosterError> {
        let _guard = self.begin(Operation::Submit)?;

        let batch: Vec<NewInvitee> = self
            .state
            .borrow()
            .invitees
            .iter()
            .filter_map(Invitee::as_new)
            .collect();
        if batch.is_empty() {
            return Err(RosterError::NothingToSave);
        }
        let saved = batch.len();

        let response = self.service.add_invitees(self.leader.id, &batch).await;
        self.ensure_attached()?;
        let response = response.inspect_err(|e| log::warn!("[ROSTER] save failed: {}", e))?;
        if !response.success {
            return Err(RosterError::Rejected(Operation::Submit));
        }
        log::info!("[ROSTER] saved {} friends", saved);

        {
            let mut state = self.state.borrow_mut();
            for invitee in state.invitees.iter_mut().filter(|i| i.is_new()) {
                if batch.iter().any(|sent| sent.email == invitee.email) {
                    invitee.origin = Origin::Saved;
                }
            }
        }

        if self.leader.has_location {
            return match self.load_roster().await {
                Ok(_) => Ok(SubmitOutcome::Reloaded { saved }),
                Err(RosterError::Detached) => Err(RosterError::Detached),
                Err(err) => {
                    log::warn!("[ROSTER] saved {} friends but reload failed: {}", saved, err);
                    Ok(SubmitOutcome::ReloadFailed { saved })
                }
            };
        }
        Ok(SubmitOutcome::Continue(HistoryUpdate::friends_saved(saved, response.extra)))
    }

    /// Replace the roster with the server's list. Responses to superseded
    /// loads are discarded.
    pub async fn load_roster(&self) -> Result<usize, RosterError> {
        let seq = {
            let mut state = self.state.borrow_mut();
            if state.detached {
                return Err(RosterError::Detached);
            }
            state.load_seq += 1;
            state.load_seq
        };

        let listed = self.service.list_invitees(self.leader.id).await;
        self.ensure_attached()?;

        let mut state = self.state.borrow_mut();
        if state.load_seq != seq {
            log::debug!("[ROSTER] discarding stale roster load {}", seq);
            return Ok(state.invitees.len());
        }
        let listed = listed?;
        state.invitees = listed
            .into_iter()
            .map(|remote| remote.into_invitee(self.leader.id))
            .collect();
        log::info!("[ROSTER] loaded {} friends", state.invitees.len());
        Ok(state.invitees.len())
    }
}
