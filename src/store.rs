//! Global Application State Store
//!
//! The registry state lives in a single reactive signal. Views derive what
//! they show through memos, so a write only re-renders the views whose
//! derived value actually changed.

use leptos::prelude::*;
use location_registry::{Location, RegistryState, StateCell};

/// Registry state cell backed by a Leptos signal
#[derive(Clone, Copy)]
pub struct SignalState(RwSignal<RegistryState>);

impl SignalState {
    pub fn new() -> Self {
        Self(RwSignal::new(RegistryState::new()))
    }

    pub fn signal(&self) -> RwSignal<RegistryState> {
        self.0
    }

    /// Locations passing the filters; unchanged by draft edits or ignored clicks
    pub fn visible_locations(&self) -> Memo<Vec<Location>> {
        let state = self.0;
        Memo::new(move |_| state.with(|s| s.visible_locations().cloned().collect()))
    }
}

impl StateCell for SignalState {
    /// Tracked read: views calling this re-run on change
    fn read<R>(&self, f: impl FnOnce(&RegistryState) -> R) -> R {
        self.0.with(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        f(&mut self.0.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use location_registry::{Category, Position};

    fn make_location(id: &str, category_id: &str) -> Location {
        Location {
            id: id.to_string(),
            position: Position::new(-26.3, -48.8),
            title: format!("Local {}", id),
            description: String::new(),
            category_id: category_id.to_string(),
            schedule: Vec::new(),
            info: String::new(),
        }
    }

    #[test]
    fn test_visible_memo_ignores_unrelated_writes() {
        let owner = Owner::new();
        owner.with(|| {
            let cell = SignalState::new();
            cell.write(|s| {
                s.replace_categories(vec![Category::new("abrigo", "Abrigo")]);
                s.replace_locations(vec![make_location("1", "abrigo")]);
            });

            let visible = cell.visible_locations();
            // Counts how often something downstream of the memo re-runs
            let rebuilds = Memo::new(move |prev: Option<&usize>| {
                visible.track();
                prev.map_or(0, |n| n + 1)
            });
            assert_eq!(rebuilds.get_untracked(), 0);

            cell.write(|s| {
                s.begin_placement();
                s.on_map_click(-26.3, -48.8);
                s.set_title("Casa X");
            });
            cell.write(|s| s.set_description("Abrigo noturno"));
            assert_eq!(rebuilds.get_untracked(), 0);

            cell.write(|s| s.toggle_filter("abrigo"));
            assert_eq!(rebuilds.get_untracked(), 1);
            assert!(visible.get_untracked().is_empty());
        });
    }
}
