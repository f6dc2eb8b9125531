//! Mapa Solidário Frontend App
//!
//! Map-centred layout with a collapsible filter panel.

use leptos::prelude::*;

use crate::commands::FirestoreStore;
use crate::components::{DeleteConfirmDialog, FilterPanel, LocationCard, LocationForm, MapView, NoticeBanner};
use crate::config::AppConfig;
use crate::context::AppContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = FirestoreStore::new(config.firestore.clone());
    if !store.is_configured() {
        log::warn!("firestore project is not configured, the map will stay empty");
    }

    let ctx = AppContext::new(store);
    provide_context(ctx);

    // Initial load, once on mount
    Effect::new(move |_| ctx.load());

    let show_filters = ctx.show_filters;
    let title = config.title;
    let map_config = config.map;

    view! {
        <div class="app-layout">
            <button
                class="toggle-filters-button"
                on:click=move |_| show_filters.update(|shown| *shown = !*shown)
            >
                {move || if show_filters.get() { "Ocultar Filtros" } else { "Mostrar Filtros" }}
            </button>

            <Show when=move || show_filters.get()>
                <FilterPanel title=title.clone() />
            </Show>

            <NoticeBanner />

            <MapView config=map_config />

            <LocationCard />
            <LocationForm />
            <DeleteConfirmDialog />
        </div>
    }
}
