//! Roster Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! read-only mirror of the controller; views read it, intents go through
//! `RosterContext`.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::form::FormState;
use crate::models::{Invitee, Notice};
use crate::roster::{Operation, PendingDeletion, RosterController};

/// Page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct RosterPageState {
    /// Roster snapshot in display order
    pub invitees: Vec<Invitee>,
    /// Invitee form snapshot
    pub form: FormState,
    /// Set while the removal dialog is open
    pub pending_deletion: Option<PendingDeletion>,
    /// Requests currently outstanding
    pub busy: Vec<Operation>,
    /// Below the roster cap
    pub can_add: bool,
    /// Enough new friends to show the save button
    pub can_save: bool,
    pub notice: Option<Notice>,
    /// Bumped for every notice so older timers don't clear newer ones
    pub notice_seq: u32,
}

/// Type alias for the store
pub type RosterStore = Store<RosterPageState>;

// ========================
// Store Helper Functions
// ========================

/// Copy the controller's current state into the store. `minimum` is the
/// number of new friends required before saving.
pub fn store_sync(store: &RosterStore, controller: &RosterController, minimum: usize) {
    store.invitees().set(controller.invitees());
    store.form().set(controller.form());
    store.pending_deletion().set(controller.pending_deletion());
    store.busy().set(controller.busy_operations());
    store.can_add().set(controller.can_add());
    store.can_save().set(controller.meets_minimum(minimum));
}

/// Only refresh the form (keystrokes)
pub fn store_sync_form(store: &RosterStore, controller: &RosterController) {
    store.form().set(controller.form());
}

/// Show a notice, returning its sequence number
pub fn store_show_notice(store: &RosterStore, notice: Notice) -> u32 {
    let seq = store.notice_seq().get_untracked().wrapping_add(1);
    store.notice_seq().set(seq);
    store.notice().set(Some(notice));
    seq
}

/// Clear the notice if it is still the one identified by `seq`
pub fn store_clear_notice(store: &RosterStore, seq: u32) {
    if store.notice_seq().get_untracked() == seq {
        store.notice().set(None);
    }
}

/// Flag a request as started before the controller reports it
pub fn store_mark_busy(store: &RosterStore, op: Operation) {
    store.busy().write().push(op);
}

pub fn store_is_busy(store: &RosterStore, op: Operation) -> bool {
    store.busy().read().contains(&op)
}
