//! Location Registry
//!
//! Owns the registry state and is the only caller of the remote store.
//! State borrows never span an `.await`: every remote call sits between a
//! synchronous prepare step and a synchronous complete step.

use std::cell::RefCell;

use crate::error::RegistryError;
use crate::model::{Location, ScheduleField};
use crate::state::RegistryState;
use crate::store::LocationStore;

/// Where the registry state lives
///
/// `RefCell` for plain use; the frontend wraps a reactive signal so that
/// every write re-renders the views reading it.
pub trait StateCell {
    fn read<R>(&self, f: impl FnOnce(&RegistryState) -> R) -> R;
    fn write<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R;
}

impl StateCell for RefCell<RegistryState> {
    fn read<R>(&self, f: impl FnOnce(&RegistryState) -> R) -> R {
        f(&self.borrow())
    }

    fn write<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

#[derive(Debug, Clone)]
pub struct Registry<S, C = RefCell<RegistryState>> {
    store: S,
    state: C,
}

impl<S: LocationStore> Registry<S> {
    pub fn new(store: S) -> Self {
        Self::with_state(store, RefCell::new(RegistryState::new()))
    }
}

impl<S: LocationStore, C: StateCell> Registry<S, C> {
    pub fn with_state(store: S, state: C) -> Self {
        Self { store, state }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Run a read-only query against the current state
    pub fn read<R>(&self, f: impl FnOnce(&RegistryState) -> R) -> R {
        self.state.read(f)
    }

    // ========================
    // Loading
    // ========================

    /// Load categories; failures degrade to an empty list. Returns the count.
    pub async fn load_categories(&self) -> usize {
        let categories = match self.store.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                log::warn!("failed to load categories: {}", e);
                Vec::new()
            }
        };
        let count = categories.len();
        log::info!("loaded {} categories", count);
        self.state.write(|s| s.replace_categories(categories));
        count
    }

    /// Load locations; failures degrade to an empty list. Returns the count.
    pub async fn load_locations(&self) -> usize {
        let locations = match self.store.list_locations().await {
            Ok(locations) => locations,
            Err(e) => {
                log::warn!("failed to load locations: {}", e);
                Vec::new()
            }
        };
        let count = locations.len();
        log::info!("loaded {} locations", count);
        self.state.write(|s| s.replace_locations(locations));
        count
    }

    // ========================
    // Filters
    // ========================

    pub fn set_filter(&self, category_id: &str, visible: bool) {
        self.state.write(|s| s.set_filter(category_id, visible));
    }

    pub fn toggle_filter(&self, category_id: &str) {
        self.state.write(|s| s.toggle_filter(category_id));
    }

    pub fn visible_locations(&self) -> Vec<Location> {
        self.state.read(|s| s.visible_locations().cloned().collect())
    }

    // ========================
    // Draft
    // ========================

    pub fn begin_placement(&self) {
        self.state.write(|s| s.begin_placement());
    }

    pub fn on_map_click(&self, latitude: f64, longitude: f64) -> bool {
        self.state.write(|s| s.on_map_click(latitude, longitude))
    }

    pub fn begin_edit(&self, location_id: &str) -> bool {
        self.state.write(|s| s.begin_edit(location_id))
    }

    pub fn cancel_edit(&self) {
        self.state.write(|s| s.cancel_edit());
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.write(|s| s.set_title(title));
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.state.write(|s| s.set_description(description));
    }

    pub fn set_category(&self, category_id: impl Into<String>) {
        self.state.write(|s| s.set_category(category_id));
    }

    pub fn set_info(&self, info: impl Into<String>) {
        self.state.write(|s| s.set_info(info));
    }

    pub fn add_schedule_entry(&self) {
        self.state.write(|s| s.add_schedule_entry());
    }

    pub fn remove_schedule_entry(&self, index: usize) {
        self.state.write(|s| s.remove_schedule_entry(index));
    }

    pub fn update_schedule_entry(&self, index: usize, field: ScheduleField, value: impl Into<String>) {
        self.state.write(|s| s.update_schedule_entry(index, field, value));
    }

    /// Persist the draft, then mirror the acknowledged write locally.
    /// Returns the id of the saved location.
    pub async fn save(&self) -> Result<String, RegistryError> {
        let request = self.state.write(|s| s.prepare_save())?;

        let result = match &request.target {
            Some(id) => self
                .store
                .update_location(id, &request.fields)
                .await
                .map(|()| id.clone()),
            None => self.store.create_location(&request.fields).await,
        };
        match &result {
            Ok(id) => log::info!("saved location {}", id),
            Err(e) => log::error!("failed to save location: {}", e),
        }

        self.state.write(|s| s.complete_save(request, result))
    }

    // ========================
    // Delete
    // ========================

    pub fn request_delete(&self, location_id: &str) -> bool {
        self.state.write(|s| s.request_delete(location_id))
    }

    pub async fn confirm_delete(&self) -> Result<(), RegistryError> {
        let request = self.state.write(|s| s.prepare_delete())?;

        let result = self.store.delete_location(&request.id).await;
        match &result {
            Ok(()) => log::info!("deleted location {}", request.id),
            Err(e) => log::error!("failed to delete location {}: {}", request.id, e),
        }

        self.state.write(|s| s.complete_delete(request, result))
    }

    pub fn cancel_delete(&self) {
        self.state.write(|s| s.cancel_delete());
    }

    pub fn dismiss_notice(&self) {
        self.state.write(|s| s.dismiss_notice());
    }
}
