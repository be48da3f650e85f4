//! Invitee Form Component
//!
//! Contact fields for a new friend plus the add button.

use leptos::prelude::*;

use crate::context::use_roster_context;
use crate::form::FieldName;
use crate::roster::Operation;
use crate::store::{store_is_busy, RosterPageStateStoreFields};

/// Single labelled input bound to one form field
#[component]
fn FieldInput(name: FieldName) -> impl IntoView {
    let ctx = use_roster_context();
    let store = ctx.store;

    let input_type = match name {
        FieldName::Email => "email",
        FieldName::Cellphone => "tel",
        _ => "text",
    };

    view! {
        <label class=move || {
            if store.form().read().shows_error(name) { "form-field error" } else { "form-field" }
        }>
            <span class="form-field-label">{name.label()} " *"</span>
            <input
                type=input_type
                name=name.as_str()
                required=true
                prop:value=move || store.form().read().value(name).to_string()
                on:focus=move |_| ctx.touch_field(name)
                on:input=move |ev| ctx.set_field(name, event_target_value(&ev))
            />
        </label>
    }
}

/// Form for adding a friend to the roster
#[component]
pub fn InviteeForm() -> impl IntoView {
    let ctx = use_roster_context();
    let store = ctx.store;

    let add_invitee = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.add_invitee();
    };

    view! {
        <form class="invitee-form" on:submit=add_invitee>
            {FieldName::ALL.iter().map(|&name| view! { <FieldInput name=name /> }).collect_view()}

            <Show
                when=move || store.can_add().get()
                fallback=|| view! { <p class="roster-full">"Your roster is full"</p> }
            >
                <button
                    type="submit"
                    class="add-btn"
                    disabled=move || {
                        store_is_busy(&store, Operation::Lookup) || store_is_busy(&store, Operation::Submit)
                    }
                >
                    "Add friend"
                </button>
            </Show>
        </form>
    }
}
