//! Roster Context
//!
//! Shared page handle provided via Leptos Context API. Wraps the store and
//! the controller and turns user intents into controller calls.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::error::RosterError;
use crate::form::FieldName;
use crate::models::{HistoryUpdate, Notice, Settings};
use crate::roster::{DeletionRequest, Operation, RosterController, SubmitOutcome};
use crate::store::{
    store_clear_notice, store_mark_busy, store_show_notice, store_sync, store_sync_form,
    RosterPageStateStoreFields, RosterStore,
};

#[derive(Clone, Copy)]
pub struct RosterContext {
    pub store: RosterStore,
    controller: StoredValue<RosterController, LocalStorage>,
    pub settings: Settings,
    notice_timeout_ms: u32,
    on_update_history: Callback<HistoryUpdate>,
}

impl RosterContext {
    pub fn new(
        store: RosterStore,
        controller: RosterController,
        settings: Settings,
        notice_timeout_ms: u32,
        on_update_history: Callback<HistoryUpdate>,
    ) -> Self {
        store_sync(&store, &controller, settings.friends);
        Self {
            store,
            controller: StoredValue::new_local(controller),
            settings,
            notice_timeout_ms,
            on_update_history,
        }
    }

    fn controller(&self) -> Option<RosterController> {
        self.controller.try_get_value()
    }

    fn sync(&self, controller: &RosterController) {
        store_sync(&self.store, controller, self.settings.friends);
    }

    /// Show a notice and schedule its removal
    pub fn notify(&self, notice: Notice) {
        let seq = store_show_notice(&self.store, notice);
        let store = self.store;
        let timeout = self.notice_timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            store_clear_notice(&store, seq);
        });
    }

    pub fn dismiss_notice(&self) {
        self.store.notice().set(None);
    }

    fn report(&self, err: &RosterError) {
        if err.is_silent() {
            log::debug!("[UI] ignoring {:?}", err);
            return;
        }
        self.notify(Notice::error(err.to_string()));
    }

    // ========================
    // Form intents
    // ========================

    pub fn set_field(&self, name: FieldName, value: String) {
        if let Some(controller) = self.controller() {
            controller.set_value(name, value);
            store_sync_form(&self.store, &controller);
        }
    }

    pub fn touch_field(&self, name: FieldName) {
        if let Some(controller) = self.controller() {
            controller.mark_touched(name);
            store_sync_form(&self.store, &controller);
        }
    }

    // ========================
    // Roster intents
    // ========================

    pub fn load(&self) {
        let Some(controller) = self.controller() else { return };
        let ctx = *self;
        spawn_local(async move {
            let result = controller.load_roster().await;
            if let Err(err) = result {
                ctx.report(&err);
                return;
            }
            ctx.sync(&controller);
        });
    }

    pub fn add_invitee(&self) {
        let Some(controller) = self.controller() else { return };
        let ctx = *self;
        spawn_local(async move {
            store_mark_busy(&ctx.store, Operation::Lookup);
            let result = controller.add_invitee().await;
            if matches!(result, Err(RosterError::Detached)) {
                return;
            }
            ctx.sync(&controller);
            if let Err(err) = result {
                ctx.report(&err);
            }
        });
    }

    pub fn request_deletion(&self, position: usize) {
        let Some(controller) = self.controller() else { return };
        match controller.request_deletion(position) {
            Ok(DeletionRequest::Removed(invitee)) => {
                log::info!("[UI] removed local friend {}", invitee.email);
            }
            Ok(DeletionRequest::AwaitingConfirmation(_)) => {}
            Err(err) => self.report(&err),
        }
        self.sync(&controller);
    }

    pub fn cancel_deletion(&self) {
        let Some(controller) = self.controller() else { return };
        controller.cancel_deletion();
        self.sync(&controller);
    }

    pub fn confirm_deletion(&self) {
        let Some(controller) = self.controller() else { return };
        let ctx = *self;
        spawn_local(async move {
            store_mark_busy(&ctx.store, Operation::Delete);
            let result = controller.confirm_deletion().await;
            if matches!(result, Err(RosterError::Detached)) {
                return;
            }
            ctx.sync(&controller);
            match result {
                Ok(Some(invitee)) => log::info!("[UI] removed friend {}", invitee.email),
                Ok(None) => {}
                Err(err) => ctx.report(&err),
            }
        });
    }

    pub fn submit(&self) {
        let Some(controller) = self.controller() else { return };
        let ctx = *self;
        spawn_local(async move {
            store_mark_busy(&ctx.store, Operation::Submit);
            let result = controller.submit().await;
            if matches!(result, Err(RosterError::Detached)) {
                return;
            }
            ctx.sync(&controller);
            match result {
                Ok(SubmitOutcome::Reloaded { saved }) => {
                    log::info!("[UI] saved {} friends, staying on roster", saved);
                    ctx.notify(Notice::info(
                        "Saved successfully. Here you can follow your friends' confirmation status",
                    ));
                }
                Ok(SubmitOutcome::ReloadFailed { saved }) => {
                    log::warn!("[UI] saved {} friends, list not refreshed", saved);
                    ctx.notify(Notice::info(
                        "Saved successfully, but the list could not be refreshed. Reload the page to see your friends' confirmation status",
                    ));
                }
                Ok(SubmitOutcome::Continue(update)) => ctx.on_update_history.run(update),
                Err(err) => ctx.report(&err),
            }
        });
    }

    /// Page is being torn down
    pub fn detach(&self) {
        if let Some(controller) = self.controller() {
            controller.detach();
        }
    }
}

/// Get the roster context
pub fn use_roster_context() -> RosterContext {
    expect_context::<RosterContext>()
}
