//! Notice Bar Component

use leptos::prelude::*;

use crate::context::use_roster_context;
use crate::models::NoticeKind;
use crate::store::RosterPageStateStoreFields;

/// Current notice, dismissed on click or after the configured timeout
#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_roster_context();
    let store = ctx.store;

    move || {
        store.notice().get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Info => "notice info",
                NoticeKind::Error => "notice error",
            };
            view! {
                <div class=class role="status" on:click=move |_| ctx.dismiss_notice()>
                    {notice.message}
                </div>
            }
        })
    }
}
