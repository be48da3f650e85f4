//! Friends Page
//!
//! Invite-your-friends step: builds the controller for the acting leader,
//! provides the roster context and lays out form, roster and dialog.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::RosterService;
use crate::components::{DeleteConfirmDialog, InviteeForm, NoticeBar, RosterList};
use crate::context::RosterContext;
use crate::models::{HistoryUpdate, Leader, Route, Settings};
use crate::roster::{RosterController, ROSTER_CAP};
use crate::store::RosterPageState;

#[component]
pub fn FriendsPage(
    leader: Option<Leader>,
    settings: Settings,
    service: Rc<dyn RosterService>,
    notice_timeout_ms: u32,
    #[prop(into)] on_update_history: Callback<HistoryUpdate>,
    #[prop(into)] on_redirect: Callback<Route>,
) -> impl IntoView {
    let controller = match RosterController::new(leader, service) {
        Ok(controller) => controller,
        Err(err) => {
            log::warn!("[UI] {}", err);
            on_redirect.run(Route::PersonalData);
            return view! { <p class="redirecting">"Redirecting to your personal data..."</p> }.into_any();
        }
    };

    let greeting = match controller.leader().firstname.as_deref() {
        Some(name) => format!("Sign up your friends, {}", name),
        None => "Sign up your friends".to_string(),
    };

    let store = Store::new(RosterPageState::default());
    let ctx = RosterContext::new(store, controller, settings, notice_timeout_ms, on_update_history);
    provide_context(ctx);

    // Load roster on mount
    Effect::new(move |_| ctx.load());
    on_cleanup(move || ctx.detach());

    view! {
        <div class="friends">
            <header class="app-header">
                <h1 class="app-title">{greeting}</h1>
            </header>
            <p>"Invite your friends to take part in the fundraiser."</p>
            <p>
                "Remember you need to invite at least " {settings.friends}
                " friends to reserve a place, and then together complete a group of " {ROSTER_CAP} "."
            </p>
            <NoticeBar />
            <div class="friends-layout">
                <InviteeForm />
                <RosterList />
            </div>
            <DeleteConfirmDialog />
        </div>
    }
    .into_any()
}
