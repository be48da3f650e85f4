//! Delete Confirm Dialog Component
//!
//! Modal asking the leader to confirm removal of a server-known friend.

use leptos::prelude::*;

use crate::context::use_roster_context;
use crate::roster::Operation;
use crate::store::{store_is_busy, RosterPageStateStoreFields};

#[component]
pub fn DeleteConfirmDialog() -> impl IntoView {
    let ctx = use_roster_context();
    let store = ctx.store;

    view! {
        <Show when=move || store.pending_deletion().read().is_some()>
            <div class="dialog-backdrop" on:click=move |_| ctx.cancel_deletion()>
                <div class="dialog" role="dialog" on:click=|ev| ev.stop_propagation()>
                    <h2 class="dialog-title">"Remove friend"</h2>
                    <p>"Are you sure you want to remove your friend?"</p>
                    <div class="dialog-actions">
                        <button class="cancel-btn" on:click=move |_| ctx.cancel_deletion()>
                            "No"
                        </button>
                        <button
                            class="confirm-btn"
                            autofocus=true
                            disabled=move || store_is_busy(&store, Operation::Delete)
                            on:click=move |_| ctx.confirm_deletion()
                        >
                            "Yes"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
