//! Roster List Component
//!
//! Numbered list of friends with removal and confirmation status.

use leptos::prelude::*;

use crate::context::use_roster_context;
use crate::models::Invitee;
use crate::roster::Operation;
use crate::store::{store_is_busy, RosterPageStateStoreFields};

#[component]
fn RosterRow(position: usize, invitee: Invitee) -> impl IntoView {
    let ctx = use_roster_context();

    let status = invitee.confirmed().map(|confirmed| {
        if confirmed {
            view! { <span class="status confirmed" title="Confirmed">"✓"</span> }.into_any()
        } else {
            view! { <span class="status pending" title="Pending confirmation">"⚠"</span> }.into_any()
        }
    });

    view! {
        <li class=if invitee.is_new() { "roster-row new" } else { "roster-row" }>
            <span class="roster-number">{position + 1} "."</span>
            <span class="roster-name">{invitee.full_name()}</span>
            <span class="roster-email">{invitee.email.clone()}</span>
            <span class="roster-cellphone">{invitee.cellphone.clone()}</span>
            <button
                class="delete-btn"
                title="Remove"
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.request_deletion(position);
                }
            >
                "×"
            </button>
            {status}
        </li>
    }
}

/// Friends added so far, with the save action once the minimum is met
#[component]
pub fn RosterList() -> impl IntoView {
    let ctx = use_roster_context();
    let store = ctx.store;

    view! {
        <Show when=move || { !store.invitees().read().is_empty() }>
            <section class="roster">
                <ol class="roster-list">
                    {move || {
                        store
                            .invitees()
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(position, invitee)| view! { <RosterRow position=position invitee=invitee /> })
                            .collect_view()
                    }}
                </ol>
                <Show when=move || store.can_save().get()>
                    <button
                        class="save-btn"
                        disabled=move || {
                            store_is_busy(&store, Operation::Submit) || store_is_busy(&store, Operation::Lookup)
                        }
                        on:click=move |_| ctx.submit()
                    >
                        "Save"
                    </button>
                </Show>
            </section>
        </Show>
    }
}
