//! Application Context
//!
//! Shared registry handle and view signals provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use location_registry::{Location, Registry, RegistryState};

use crate::commands::FirestoreStore;
use crate::store::SignalState;

pub type AppRegistry = Registry<FirestoreStore, SignalState>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    registry: StoredValue<AppRegistry, LocalStorage>,
    /// Registry state - read
    pub state: RwSignal<RegistryState>,
    /// Locations passing the filters, re-evaluated only when that set changes
    pub visible: Memo<Vec<Location>>,
    /// Whether the filter panel is shown
    pub show_filters: RwSignal<bool>,
    /// Location whose card is open
    pub selected: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(store: FirestoreStore) -> Self {
        let cell = SignalState::new();
        Self {
            registry: StoredValue::new_local(Registry::with_state(store, cell)),
            state: cell.signal(),
            visible: cell.visible_locations(),
            show_filters: RwSignal::new(true),
            selected: RwSignal::new(None),
        }
    }

    /// Run a synchronous registry operation
    pub fn with_registry<R>(&self, f: impl FnOnce(&AppRegistry) -> R) -> R {
        self.registry.with_value(f)
    }

    /// Owned handle for async tasks
    fn registry(&self) -> AppRegistry {
        self.registry.get_value()
    }

    /// Fetch categories and locations; neither waits for the other
    pub fn load(&self) {
        let registry = self.registry();
        spawn_local(async move {
            registry.load_categories().await;
        });
        let registry = self.registry();
        spawn_local(async move {
            registry.load_locations().await;
        });
    }

    pub fn save(&self) {
        let registry = self.registry();
        let selected = self.selected;
        spawn_local(async move {
            match registry.save().await {
                Ok(id) => selected.set(Some(id)),
                Err(e) => log::warn!("save not completed: {}", e),
            }
        });
    }

    pub fn confirm_delete(&self) {
        let registry = self.registry();
        let selected = self.selected;
        let target = self.state.with_untracked(|s| s.pending_deletion().map(str::to_string));
        spawn_local(async move {
            match registry.confirm_delete().await {
                Ok(()) => selected.update(|current| {
                    if *current == target {
                        *current = None;
                    }
                }),
                Err(e) => log::warn!("delete not completed: {}", e),
            }
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
