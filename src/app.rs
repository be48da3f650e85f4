//! Friends Step App
//!
//! Wires configuration, the HTTP roster backend and the host page's
//! navigation hooks into the friends page.

use std::rc::Rc;

use leptos::prelude::*;
use serde::Serialize;
use rolling_logger::RollingLogger;
use web_sys::{CustomEvent, CustomEventInit};

use crate::api::{resolve_base_url, HttpRosterService, RosterService};
use crate::components::{ActivityLog, FriendsPage};
use crate::config::AppConfig;
use crate::models::{HistoryUpdate, Route};

/// DOM event carrying the navigation payload to the host page
pub const HISTORY_EVENT: &str = "roster:update-history";

/// Hand the navigation payload to the host page
fn dispatch_history_update(update: &HistoryUpdate) {
    let Some(window) = web_sys::window() else { return };
    let detail = match update.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(detail) => detail,
        Err(err) => {
            log::error!("[APP] could not serialize history update: {}", err);
            return;
        }
    };

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(HISTORY_EVENT, &init) {
        Ok(event) => {
            if window.dispatch_event(&event).is_err() {
                log::error!("[APP] dispatching {} failed", HISTORY_EVENT);
            }
        }
        Err(err) => log::error!("[APP] could not create {}: {:?}", HISTORY_EVENT, err),
    }
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

fn redirect(route: Route) {
    let Some(window) = web_sys::window() else { return };
    log::info!("[APP] redirecting to {}", route.path());
    if let Err(err) = window.location().set_href(route.path()) {
        log::error!("[APP] redirect failed: {:?}", err);
    }
}

#[component]
pub fn App(config: AppConfig, logger: Option<&'static RollingLogger>) -> impl IntoView {
    let AppConfig { api_base_url, settings, current_user, notice_timeout_ms, .. } = config;
    let base_url = resolve_base_url(&page_origin(), &api_base_url);
    let service: Rc<dyn RosterService> = Rc::new(HttpRosterService::new(base_url));

    let on_update_history = Callback::new(|update: HistoryUpdate| {
        log::info!("[APP] friends saved, continuing with {} new", update.new_invitee_count);
        dispatch_history_update(&update);
    });
    let on_redirect = Callback::new(redirect);

    view! {
        <main class="app">
            <FriendsPage
                leader=current_user
                settings=settings
                service=service
                notice_timeout_ms=notice_timeout_ms
                on_update_history=on_update_history
                on_redirect=on_redirect
            />
            {logger.map(|logger| view! { <ActivityLog logger=logger /> })}
        </main>
    }
}
