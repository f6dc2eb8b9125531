//! Delete Confirm Dialog Component
//!
//! Confirmation for the location awaiting deletion, with confirm/cancel actions.

use leptos::prelude::*;

use crate::context::use_app_context;

/// Delete confirmation
///
/// Shown while a deletion is pending. ✓ removes the location from the
/// store, ✗ drops the request without touching it.
#[component]
pub fn DeleteConfirmDialog() -> impl IntoView {
    let ctx = use_app_context();

    let pending_title = move || {
        ctx.state.with(|s| {
            s.pending_deletion()
                .and_then(|id| s.location(id))
                .map(|l| l.title.clone())
        })
    };
    let deleting = move || ctx.state.with(|s| s.is_deleting());

    view! {
        <Show when=move || pending_title().is_some()>
            <div class="modal-overlay">
                <div class="delete-confirm">
                    <span class="delete-confirm-text">
                        {move || format!("Excluir \"{}\"?", pending_title().unwrap_or_default())}
                    </span>
                    <button
                        class="confirm-btn"
                        disabled=deleting
                        on:click=move |ev| {
                            ev.stop_propagation();
                            ctx.confirm_delete();
                        }
                    >
                        "✓"
                    </button>
                    <button
                        class="cancel-btn"
                        disabled=deleting
                        on:click=move |ev| {
                            ev.stop_propagation();
                            ctx.with_registry(|r| r.cancel_delete());
                        }
                    >
                        "✗"
                    </button>
                </div>
            </div>
        </Show>
    }
}
