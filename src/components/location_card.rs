//! Location Card Component
//!
//! Details of the marker last clicked, with edit and delete actions.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn LocationCard() -> impl IntoView {
    let ctx = use_app_context();

    // None once the location is filtered out or deleted; draft edits leave it unchanged
    let shown = Memo::new(move |_| {
        let id = ctx.selected.get()?;
        let location = ctx.visible.with(|visible| visible.iter().find(|l| l.id == id).cloned())?;
        let category = ctx.state.with(|s| {
            s.category(&location.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| location.category_id.clone())
        });
        Some((location, category))
    });

    move || {
        shown.get().map(|(location, category)| {
            let schedule = location.schedule_summary();
            let edit_id = location.id.clone();
            let delete_id = location.id.clone();

            view! {
                <div class="location-card">
                    <button class="close-btn" on:click=move |_| ctx.selected.set(None)>"×"</button>
                    <h2>{location.title}</h2>
                    <p class="location-category">{category}</p>
                    <p>{location.description}</p>
                    {(!schedule.is_empty()).then(|| view! {
                        <p><strong>"Horário: "</strong>{schedule}</p>
                    })}
                    {(!location.info.is_empty()).then(|| view! {
                        <p class="location-info">{location.info}</p>
                    })}
                    <div class="card-actions">
                        <button
                            class="edit-btn"
                            on:click=move |_| {
                                ctx.with_registry(|r| r.begin_edit(&edit_id));
                            }
                        >
                            "Editar"
                        </button>
                        <button
                            class="delete-btn"
                            on:click=move |_| {
                                ctx.with_registry(|r| r.request_delete(&delete_id));
                            }
                        >
                            "Excluir"
                        </button>
                    </div>
                </div>
            }
        })
    }
}
