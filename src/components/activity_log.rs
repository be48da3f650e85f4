//! Activity Log Component
//!
//! Footer panel listing the most recent log lines, for support requests.

use leptos::prelude::*;
use rolling_logger::RollingLogger;

#[component]
pub fn ActivityLog(logger: &'static RollingLogger) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    // Snapshot taken on open; the buffer is not reactive
    let toggle = move |_| {
        if !open.get_untracked() {
            set_lines.set(logger.recent());
        }
        set_open.update(|open| *open = !*open);
    };

    view! {
        <footer class="activity-log">
            <button class="activity-toggle" on:click=toggle>
                {move || if open.get() { "Hide activity" } else { "Show activity" }}
            </button>
            <Show when=move || open.get()>
                <pre class="activity-lines">{move || lines.get().join("\n")}</pre>
            </Show>
        </footer>
    }
}
