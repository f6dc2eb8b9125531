//! Location Form Component
//!
//! Modal editing the registry draft, for both new and existing locations.

use leptos::prelude::*;
use location_registry::{Draft, ScheduleField, MAX_SCHEDULE_ENTRIES, MIN_SCHEDULE_ENTRIES};

use crate::context::use_app_context;

/// One opening-hours row of the draft
#[component]
fn ScheduleRow(index: usize) -> impl IntoView {
    let ctx = use_app_context();

    let value = move |field: ScheduleField| {
        ctx.state.with(|s| {
            s.draft()
                .schedule
                .get(index)
                .map(|entry| match field {
                    ScheduleField::From => entry.from.clone(),
                    ScheduleField::To => entry.to.clone(),
                })
                .unwrap_or_default()
        })
    };
    let can_remove = move || ctx.state.with(|s| s.draft().schedule.len() > MIN_SCHEDULE_ENTRIES);

    view! {
        <div class="schedule-row">
            <input
                type="time"
                prop:value=move || value(ScheduleField::From)
                on:input=move |ev| {
                    let from = event_target_value(&ev);
                    ctx.with_registry(|r| r.update_schedule_entry(index, ScheduleField::From, from));
                }
            />
            <span>" até "</span>
            <input
                type="time"
                prop:value=move || value(ScheduleField::To)
                on:input=move |ev| {
                    let to = event_target_value(&ev);
                    ctx.with_registry(|r| r.update_schedule_entry(index, ScheduleField::To, to));
                }
            />
            <Show when=can_remove>
                <button
                    type="button"
                    class="remove-schedule-btn"
                    on:click=move |_| ctx.with_registry(|r| r.remove_schedule_entry(index))
                >
                    "×"
                </button>
            </Show>
        </div>
    }
}

#[component]
pub fn LocationForm() -> impl IntoView {
    let ctx = use_app_context();

    let is_open = move || ctx.state.with(|s| s.is_form_open());
    let is_editing = move || ctx.state.with(|s| s.editing_target().is_some());
    let saving = move || ctx.state.with(|s| s.is_saving());
    let draft_text = move |read: fn(&Draft) -> String| {
        move || ctx.state.with(|s| read(s.draft()))
    };
    let selected_category = move || ctx.state.with(|s| s.draft().category_id.clone().unwrap_or_default());
    let position_label = move || {
        ctx.state.with(|s| {
            s.draft()
                .position
                .map(|p| format!("{:.5}, {:.5}", p.latitude, p.longitude))
                .unwrap_or_else(|| "-".to_string())
        })
    };
    let row_indices = move || ctx.state.with(|s| (0..s.draft().schedule.len()).collect::<Vec<_>>());
    let can_add_row = move || ctx.state.with(|s| s.draft().schedule.len() < MAX_SCHEDULE_ENTRIES);

    view! {
        <Show when=is_open>
            <div class="modal-overlay">
                <form
                    class="modal"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        ctx.save();
                    }
                >
                    <h2>{move || if is_editing() { "Editar Marcador" } else { "Adicionar Marcador" }}</h2>

                    <p class="draft-position">"Posição: " {position_label}</p>

                    <label>
                        "Título:"
                        <input
                            type="text"
                            prop:value=draft_text(|d| d.title.clone())
                            on:input=move |ev| {
                                let title = event_target_value(&ev);
                                ctx.with_registry(|r| r.set_title(title));
                            }
                        />
                    </label>

                    <label>
                        "Descrição:"
                        <input
                            type="text"
                            prop:value=draft_text(|d| d.description.clone())
                            on:input=move |ev| {
                                let description = event_target_value(&ev);
                                ctx.with_registry(|r| r.set_description(description));
                            }
                        />
                    </label>

                    <label>
                        "Categoria:"
                        <select on:change=move |ev| {
                            let category = event_target_value(&ev);
                            ctx.with_registry(|r| r.set_category(category));
                        }>
                            <For
                                each=move || ctx.state.with(|s| s.categories().to_vec())
                                key=|category| category.id.clone()
                                children=move |category| {
                                    let id = category.id.clone();
                                    let value = id.clone();
                                    view! {
                                        <option value=value selected=move || selected_category() == id>
                                            {category.name}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </label>

                    <div class="schedule-field">
                        "Horários de Atendimento:"
                        <For
                            each=row_indices
                            key=|index| *index
                            children=move |index| view! { <ScheduleRow index=index /> }
                        />
                        <button
                            type="button"
                            disabled=move || !can_add_row()
                            on:click=move |_| ctx.with_registry(|r| r.add_schedule_entry())
                        >
                            "Adicionar Turno"
                        </button>
                    </div>

                    <label>
                        "Informações Adicionais:"
                        <input
                            type="text"
                            prop:value=draft_text(|d| d.info.clone())
                            on:input=move |ev| {
                                let info = event_target_value(&ev);
                                ctx.with_registry(|r| r.set_info(info));
                            }
                        />
                    </label>

                    <div class="modal-actions">
                        <button type="submit" disabled=saving>
                            {move || if saving() { "Salvando..." } else { "Salvar" }}
                        </button>
                        <button
                            type="button"
                            disabled=saving
                            on:click=move |_| ctx.with_registry(|r| r.cancel_edit())
                        >
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
