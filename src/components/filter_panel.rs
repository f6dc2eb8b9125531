//! Filter Panel Component
//!
//! Category checkboxes plus the placement-mode toggle.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn FilterPanel(#[prop(into)] title: String) -> impl IntoView {
    let ctx = use_app_context();

    let categories = move || ctx.state.with(|s| s.categories().to_vec());
    let placing = move || ctx.state.with(|s| s.is_placing());

    view! {
        <div class="filter-box">
            <h1 class="project-title">{title}</h1>

            <For
                each=categories
                key=|category| category.id.clone()
                children=move |category| {
                    let id = category.id.clone();
                    let toggle_id = id.clone();
                    view! {
                        <label class="filter-option" title=category.description.clone()>
                            <input
                                type="checkbox"
                                prop:checked=move || ctx.state.with(|s| s.is_visible(&id))
                                on:change=move |_| ctx.with_registry(|r| r.toggle_filter(&toggle_id))
                            />
                            " "
                            {category.name}
                        </label>
                    }
                }
            />

            {move || categories().is_empty().then(|| view! {
                <p class="no-categories-message">"Nenhuma categoria carregada"</p>
            })}

            <button
                class=move || if placing() { "add-marker-button active" } else { "add-marker-button" }
                on:click=move |_| ctx.with_registry(|r| r.begin_placement())
            >
                {move || if placing() { "Cancelar Marcador" } else { "Adicionar Marcador" }}
            </button>

            <Show when=placing>
                <p class="placement-hint">"Clique no mapa para posicionar o novo marcador."</p>
            </Show>
        </div>
    }
}
