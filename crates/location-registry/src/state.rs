//! Registry State
//!
//! Synchronous state machine behind the registry: locations, categories,
//! filters, the draft and the pending deletion. Remote writes are split into
//! a `prepare_*` step that snapshots the request and marks it in flight, and
//! a `complete_*` step that applies the store's answer.

use std::collections::HashMap;

use crate::error::{Operation, RegistryError, StoreResult, ValidationError};
use crate::model::{
    Category, Draft, Location, LocationFields, Position, ScheduleEntry, ScheduleField,
    MAX_SCHEDULE_ENTRIES, MIN_SCHEDULE_ENTRIES,
};

/// Kind of user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    WriteFailed,
}

/// Message shown to the user until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn validation() -> Self {
        Self {
            kind: NoticeKind::Validation,
            message: "Por favor, preencha todos os campos obrigatórios.".to_string(),
        }
    }

    fn save_failed() -> Self {
        Self {
            kind: NoticeKind::WriteFailed,
            message: "Erro ao salvar marcador. Tente novamente.".to_string(),
        }
    }

    fn delete_failed() -> Self {
        Self {
            kind: NoticeKind::WriteFailed,
            message: "Erro ao excluir marcador. Tente novamente.".to_string(),
        }
    }
}

/// Snapshot of a save handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    /// Location being edited; `None` creates a new one
    pub target: Option<String>,
    pub fields: LocationFields,
}

/// Snapshot of a delete handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryState {
    categories: Vec<Category>,
    locations: Vec<Location>,
    filters: HashMap<String, bool>,
    draft: Draft,
    editing_target: Option<String>,
    placing: bool,
    form_open: bool,
    pending_deletion: Option<String>,
    saving: bool,
    deleting: bool,
    notice: Option<Notice>,
}

impl RegistryState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Accessors
    // ========================

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn filters(&self) -> &HashMap<String, bool> {
        &self.filters
    }

    /// Categories without a filter entry are hidden
    pub fn is_visible(&self, category_id: &str) -> bool {
        self.filters.get(category_id).copied().unwrap_or(false)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing_target(&self) -> Option<&str> {
        self.editing_target.as_deref()
    }

    pub fn is_placing(&self) -> bool {
        self.placing
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn pending_deletion(&self) -> Option<&str> {
        self.pending_deletion.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// First loaded category, used for new drafts
    pub fn default_category(&self) -> Option<String> {
        self.categories.first().map(|c| c.id.clone())
    }

    // ========================
    // Loading
    // ========================

    /// Replace categories and reset every filter to visible
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.filters = categories.iter().map(|c| (c.id.clone(), true)).collect();
        self.categories = categories;

        // Only fill an unset category; never overwrite a user's choice
        if self.draft.category_id.is_none() && !self.saving {
            self.draft.category_id = self.default_category();
        }
    }

    pub fn replace_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
    }

    // ========================
    // Filters
    // ========================

    pub fn set_filter(&mut self, category_id: &str, visible: bool) {
        self.filters.insert(category_id.to_string(), visible);
    }

    pub fn toggle_filter(&mut self, category_id: &str) {
        let visible = !self.is_visible(category_id);
        self.set_filter(category_id, visible);
    }

    /// Locations whose category is switched on, in list order
    pub fn visible_locations(&self) -> impl Iterator<Item = &Location> + '_ {
        self.locations
            .iter()
            .filter(move |location| self.is_visible(&location.category_id))
    }

    // ========================
    // Placement & Editing
    // ========================

    /// Enter placement mode with a fresh draft, or cancel it when already placing
    pub fn begin_placement(&mut self) {
        if self.saving {
            log::debug!("placement ignored: save in flight");
            return;
        }
        if self.placing {
            self.cancel_edit();
            return;
        }
        self.draft = Draft::fresh(self.default_category());
        self.editing_target = None;
        self.form_open = false;
        self.placing = true;
    }

    /// Returns true when the click was consumed as the draft position
    pub fn on_map_click(&mut self, latitude: f64, longitude: f64) -> bool {
        if !self.placing {
            return false;
        }
        self.draft.position = Some(Position::new(latitude, longitude));
        self.form_open = true;
        self.placing = false;
        true
    }

    /// Load a persisted location into the draft; false if the id is unknown
    pub fn begin_edit(&mut self, location_id: &str) -> bool {
        if self.saving {
            log::debug!("edit of {} ignored: save in flight", location_id);
            return false;
        }
        let Some(draft) = self.location(location_id).map(Draft::from_location) else {
            log::warn!("edit requested for unknown location {}", location_id);
            return false;
        };
        self.draft = draft;
        self.editing_target = Some(location_id.to_string());
        self.placing = false;
        self.form_open = true;
        true
    }

    pub fn cancel_edit(&mut self) {
        if self.saving {
            log::debug!("cancel ignored: save in flight");
            return;
        }
        self.reset_draft();
    }

    fn reset_draft(&mut self) {
        self.draft = Draft::default();
        self.form_open = false;
        self.placing = false;
        self.editing_target = None;
    }

    // ========================
    // Draft Fields
    // ========================

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        if self.saving {
            None
        } else {
            Some(&mut self.draft)
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.title = title.into();
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.description = description.into();
        }
    }

    pub fn set_category(&mut self, category_id: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.category_id = Some(category_id.into());
        }
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.info = info.into();
        }
    }

    pub fn add_schedule_entry(&mut self) {
        if let Some(draft) = self.draft_mut() {
            if draft.schedule.len() < MAX_SCHEDULE_ENTRIES {
                draft.schedule.push(ScheduleEntry::default());
            }
        }
    }

    pub fn remove_schedule_entry(&mut self, index: usize) {
        if let Some(draft) = self.draft_mut() {
            if draft.schedule.len() > MIN_SCHEDULE_ENTRIES && index < draft.schedule.len() {
                draft.schedule.remove(index);
            }
        }
    }

    pub fn update_schedule_entry(&mut self, index: usize, field: ScheduleField, value: impl Into<String>) {
        if let Some(entry) = self.draft_mut().and_then(|d| d.schedule.get_mut(index)) {
            match field {
                ScheduleField::From => entry.from = value.into(),
                ScheduleField::To => entry.to = value.into(),
            }
        }
    }

    // ========================
    // Save
    // ========================

    fn validate(&self) -> Result<Position, ValidationError> {
        if self.draft.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        self.draft.position.ok_or(ValidationError::MissingPosition)
    }

    /// Validate the draft and mark the save as in flight
    pub fn prepare_save(&mut self) -> Result<SaveRequest, RegistryError> {
        if self.saving {
            return Err(RegistryError::Busy(Operation::Save));
        }
        let position = match self.validate() {
            Ok(position) => position,
            Err(e) => {
                self.notice = Some(Notice::validation());
                return Err(e.into());
            }
        };

        let draft = &self.draft;
        let fields = LocationFields {
            position,
            title: draft.title.clone(),
            description: draft.description.clone(),
            category_id: draft.category_id.clone().unwrap_or_default(),
            schedule: draft.schedule.clone(),
            info: draft.info.clone(),
        };
        self.saving = true;
        Ok(SaveRequest {
            target: self.editing_target.clone(),
            fields,
        })
    }

    /// Apply the store's answer; `result` carries the saved location's id
    pub fn complete_save(&mut self, request: SaveRequest, result: StoreResult<String>) -> Result<String, RegistryError> {
        self.saving = false;
        let id = match result {
            Ok(id) => id,
            Err(e) => {
                self.notice = Some(Notice::save_failed());
                return Err(e.into());
            }
        };

        match request.target {
            Some(target) => {
                match self.locations.iter_mut().find(|l| l.id == target) {
                    Some(location) => location.apply_fields(request.fields),
                    None => log::warn!("saved location {} is no longer listed", target),
                }
            }
            None => self.locations.push(Location::from_fields(id.clone(), request.fields)),
        }

        self.notice = None;
        self.reset_draft();
        Ok(id)
    }

    // ========================
    // Delete
    // ========================

    /// Stage a location for deletion; false if unknown or a delete is in flight
    pub fn request_delete(&mut self, location_id: &str) -> bool {
        if self.deleting || self.location(location_id).is_none() {
            return false;
        }
        self.pending_deletion = Some(location_id.to_string());
        true
    }

    pub fn prepare_delete(&mut self) -> Result<DeleteRequest, RegistryError> {
        if self.deleting {
            return Err(RegistryError::Busy(Operation::Delete));
        }
        let id = self.pending_deletion.clone().ok_or(RegistryError::NothingPending)?;
        self.deleting = true;
        Ok(DeleteRequest { id })
    }

    pub fn complete_delete(&mut self, request: DeleteRequest, result: StoreResult<()>) -> Result<(), RegistryError> {
        self.deleting = false;
        if let Err(e) = result {
            self.notice = Some(Notice::delete_failed());
            return Err(e.into());
        }

        self.locations.retain(|l| l.id != request.id);
        if self.pending_deletion.as_deref() == Some(request.id.as_str()) {
            self.pending_deletion = None;
        }
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_deletion = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn make_location(id: &str, category_id: &str) -> Location {
        Location {
            id: id.to_string(),
            position: Position::new(-26.3, -48.8),
            title: format!("Local {}", id),
            description: String::new(),
            category_id: category_id.to_string(),
            schedule: vec![ScheduleEntry::new("08:00", "18:00")],
            info: String::new(),
        }
    }

    fn loaded_state() -> RegistryState {
        let mut state = RegistryState::new();
        state.replace_categories(vec![
            Category::new("abrigo", "Abrigo"),
            Category::new("caps", "CAPS"),
        ]);
        state.replace_locations(vec![
            make_location("1", "abrigo"),
            make_location("2", "caps"),
            make_location("3", "abrigo"),
            make_location("4", "removida"),
        ]);
        state
    }

    fn visible_ids(state: &RegistryState) -> Vec<String> {
        state.visible_locations().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_visible_follows_filters() {
        let mut state = loaded_state();
        assert_eq!(visible_ids(&state), vec!["1", "2", "3"]);

        state.set_filter("abrigo", false);
        assert_eq!(visible_ids(&state), vec!["2"]);

        state.toggle_filter("abrigo");
        state.toggle_filter("caps");
        assert_eq!(visible_ids(&state), vec!["1", "3"]);

        for location in state.locations() {
            let shown = visible_ids(&state).contains(&location.id);
            assert_eq!(shown, state.is_visible(&location.category_id));
        }
    }

    #[test]
    fn test_unknown_category_hidden() {
        let mut state = loaded_state();
        assert!(!visible_ids(&state).contains(&"4".to_string()));
        state.set_filter("removida", true);
        assert!(visible_ids(&state).contains(&"4".to_string()));
    }

    #[test]
    fn test_reload_categories_resets_filters() {
        let mut state = loaded_state();
        state.set_filter("abrigo", false);
        state.replace_categories(vec![Category::new("abrigo", "Abrigo")]);
        assert!(state.is_visible("abrigo"));
        assert!(!state.is_visible("caps"));
    }

    #[test]
    fn test_schedule_bounds() {
        let mut state = loaded_state();
        state.begin_placement();
        assert_eq!(state.draft().schedule.len(), 1);

        for _ in 0..10 {
            state.add_schedule_entry();
        }
        assert_eq!(state.draft().schedule.len(), MAX_SCHEDULE_ENTRIES);

        for _ in 0..10 {
            state.remove_schedule_entry(0);
        }
        assert_eq!(state.draft().schedule.len(), MIN_SCHEDULE_ENTRIES);

        state.add_schedule_entry();
        state.remove_schedule_entry(5);
        assert_eq!(state.draft().schedule.len(), 2);
    }

    #[test]
    fn test_update_schedule_entry() {
        let mut state = loaded_state();
        state.begin_placement();
        state.update_schedule_entry(0, ScheduleField::From, "08:00");
        state.update_schedule_entry(0, ScheduleField::To, "12:00");
        state.update_schedule_entry(3, ScheduleField::To, "23:00");
        assert_eq!(state.draft().schedule, vec![ScheduleEntry::new("08:00", "12:00")]);
    }

    #[test]
    fn test_placement_toggle_twice_is_cancel() {
        let mut state = loaded_state();
        state.begin_placement();
        assert!(state.is_placing());
        assert_eq!(state.draft().category_id.as_deref(), Some("abrigo"));

        state.begin_placement();
        assert!(!state.is_placing());
        assert!(!state.is_form_open());
        assert!(state.draft().is_empty());
    }

    #[test]
    fn test_map_click_only_in_placement() {
        let mut state = loaded_state();
        assert!(!state.on_map_click(-26.3, -48.8));
        assert!(state.draft().position.is_none());
        assert!(!state.is_form_open());

        state.begin_placement();
        assert!(state.on_map_click(-26.3, -48.8));
        assert_eq!(state.draft().position, Some(Position::new(-26.3, -48.8)));
        assert!(state.is_form_open());
        assert!(!state.is_placing());

        // A second click after the form opened is ignored
        assert!(!state.on_map_click(0.0, 0.0));
        assert_eq!(state.draft().position, Some(Position::new(-26.3, -48.8)));
    }

    #[test]
    fn test_begin_edit_copies_location() {
        let mut state = loaded_state();
        state.begin_placement();
        assert!(state.begin_edit("2"));
        assert_eq!(state.editing_target(), Some("2"));
        assert!(state.is_form_open());
        assert!(!state.is_placing());
        assert_eq!(state.draft().title, "Local 2");

        state.set_title("Alterado");
        assert_eq!(state.location("2").map(|l| l.title.as_str()), Some("Local 2"));

        assert!(!state.begin_edit("missing"));
        assert_eq!(state.editing_target(), Some("2"));
    }

    #[test]
    fn test_cancel_edit_clears_everything() {
        let mut state = loaded_state();
        state.begin_edit("1");
        state.cancel_edit();
        assert!(state.draft().is_empty());
        assert!(state.editing_target().is_none());
        assert!(!state.is_form_open());
    }

    #[test]
    fn test_late_categories_keep_user_choice() {
        let mut state = RegistryState::new();
        state.begin_placement();
        assert!(state.draft().category_id.is_none());

        state.set_category("caps");
        state.replace_categories(vec![Category::new("abrigo", "Abrigo")]);
        assert_eq!(state.draft().category_id.as_deref(), Some("caps"));
    }

    #[test]
    fn test_late_categories_fill_empty_choice() {
        let mut state = RegistryState::new();
        state.begin_placement();
        state.replace_categories(vec![Category::new("abrigo", "Abrigo")]);
        assert_eq!(state.draft().category_id.as_deref(), Some("abrigo"));
    }

    #[test]
    fn test_prepare_save_validation() {
        let mut state = loaded_state();
        state.begin_placement();
        state.on_map_click(-26.3, -48.8);
        assert_eq!(
            state.prepare_save(),
            Err(RegistryError::Validation(ValidationError::MissingTitle))
        );
        assert_eq!(state.notice().map(|n| n.kind), Some(NoticeKind::Validation));
        assert!(!state.is_saving());

        let mut state = loaded_state();
        state.begin_placement();
        state.set_title("Sem posição");
        assert_eq!(
            state.prepare_save(),
            Err(RegistryError::Validation(ValidationError::MissingPosition))
        );
    }

    #[test]
    fn test_whitespace_title_is_accepted() {
        let mut state = loaded_state();
        state.begin_placement();
        state.on_map_click(-26.3, -48.8);
        state.set_title("   ");

        let request = state.prepare_save().expect("non-empty title");
        assert_eq!(request.fields.title, "   ");
        assert!(state.notice().is_none());
        assert!(state.is_saving());
    }

    #[test]
    fn test_draft_locked_while_saving() {
        let mut state = loaded_state();
        state.begin_edit("1");
        state.set_title("Novo nome");
        let request = state.prepare_save().expect("valid draft");

        state.set_title("ignored");
        state.add_schedule_entry();
        state.cancel_edit();
        state.begin_placement();
        assert_eq!(state.draft().title, "Novo nome");
        assert_eq!(state.prepare_save(), Err(RegistryError::Busy(Operation::Save)));

        state
            .complete_save(request, Ok("1".to_string()))
            .expect("acknowledged");
        assert_eq!(state.location("1").map(|l| l.title.as_str()), Some("Novo nome"));
        assert!(state.draft().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_form() {
        let mut state = loaded_state();
        state.begin_placement();
        state.on_map_click(-26.3, -48.8);
        state.set_title("Casa X");
        let request = state.prepare_save().expect("valid draft");
        let result = state.complete_save(request, Err(StoreError::write("offline")));

        assert!(matches!(result, Err(RegistryError::Store(_))));
        assert!(state.is_form_open());
        assert_eq!(state.draft().title, "Casa X");
        assert_eq!(state.locations().len(), 4);
        assert_eq!(state.notice().map(|n| n.kind), Some(NoticeKind::WriteFailed));
    }

    #[test]
    fn test_delete_flow() {
        let mut state = loaded_state();
        assert_eq!(state.prepare_delete(), Err(RegistryError::NothingPending));
        assert!(!state.request_delete("missing"));

        assert!(state.request_delete("2"));
        let request = state.prepare_delete().expect("pending");
        assert_eq!(state.prepare_delete(), Err(RegistryError::Busy(Operation::Delete)));
        assert!(!state.request_delete("3"));

        state.complete_delete(request, Ok(())).expect("acknowledged");
        assert!(state.location("2").is_none());
        assert!(state.pending_deletion().is_none());
        assert_eq!(state.locations().len(), 3);
    }

    #[test]
    fn test_cancel_delete() {
        let mut state = loaded_state();
        state.request_delete("1");
        state.cancel_delete();
        assert!(state.pending_deletion().is_none());
        assert_eq!(state.locations().len(), 4);
    }

    #[test]
    fn test_dismiss_notice() {
        let mut state = loaded_state();
        state.begin_placement();
        let _ = state.prepare_save();
        assert!(state.notice().is_some());
        state.dismiss_notice();
        assert!(state.notice().is_none());
    }
}
