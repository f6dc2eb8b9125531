//! Registry Models
//!
//! Categories, locations and the draft edited through the form.

use serde::{Deserialize, Serialize};

/// Upper bound on schedule rows while editing
pub const MAX_SCHEDULE_ENTRIES: usize = 7;

/// Lower bound on schedule rows while editing
pub const MIN_SCHEDULE_ENTRIES: usize = 1;

/// Location category (loaded once, never edited locally)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// Geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One opening-hours row ("08:00" to "17:00")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub from: String,
    pub to: String,
}

impl ScheduleEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.from, self.to)
    }
}

/// Which side of a schedule row to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleField {
    From,
    To,
}

/// Location payload without identity, sent on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFields {
    pub position: Position,
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub schedule: Vec<ScheduleEntry>,
    pub info: String,
}

/// Persisted location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub position: Position,
    pub title: String,
    pub description: String,
    pub category_id: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default)]
    pub info: String,
}

impl Location {
    pub fn from_fields(id: impl Into<String>, fields: LocationFields) -> Self {
        Self {
            id: id.into(),
            position: fields.position,
            title: fields.title,
            description: fields.description,
            category_id: fields.category_id,
            schedule: fields.schedule,
            info: fields.info,
        }
    }

    /// Overwrite everything except the id
    pub fn apply_fields(&mut self, fields: LocationFields) {
        self.position = fields.position;
        self.title = fields.title;
        self.description = fields.description;
        self.category_id = fields.category_id;
        self.schedule = fields.schedule;
        self.info = fields.info;
    }

    /// Opening hours as shown in the marker card, e.g. "08:00 - 12:00, 13:00 - 17:00"
    pub fn schedule_summary(&self) -> String {
        self.schedule
            .iter()
            .map(ScheduleEntry::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The single location being created or edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub position: Option<Position>,
    pub title: String,
    pub description: String,
    pub category_id: Option<String>,
    pub schedule: Vec<ScheduleEntry>,
    pub info: String,
}

impl Draft {
    /// Draft started from placement mode: default category and one blank row
    pub fn fresh(default_category: Option<String>) -> Self {
        Self {
            category_id: default_category,
            schedule: vec![ScheduleEntry::default()],
            ..Default::default()
        }
    }

    /// Copy of a persisted location, with a blank row if it has no schedule
    pub fn from_location(location: &Location) -> Self {
        let mut schedule = location.schedule.clone();
        if schedule.is_empty() {
            schedule.push(ScheduleEntry::default());
        }
        Self {
            position: Some(location.position),
            title: location.title.clone(),
            description: location.description.clone(),
            category_id: Some(location.category_id.clone()),
            schedule,
            info: location.info.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_location(id: &str, schedule: Vec<ScheduleEntry>) -> Location {
        Location {
            id: id.to_string(),
            position: Position::new(-26.3, -48.8),
            title: "Abrigo Central".to_string(),
            description: "Rua XV".to_string(),
            category_id: "abrigo".to_string(),
            schedule,
            info: String::new(),
        }
    }

    #[test]
    fn test_schedule_summary() {
        let location = make_location(
            "a",
            vec![ScheduleEntry::new("08:00", "12:00"), ScheduleEntry::new("13:00", "17:00")],
        );
        assert_eq!(location.schedule_summary(), "08:00 - 12:00, 13:00 - 17:00");
        assert_eq!(make_location("b", vec![]).schedule_summary(), "");
    }

    #[test]
    fn test_draft_from_location_fills_empty_schedule() {
        let draft = Draft::from_location(&make_location("a", vec![]));
        assert_eq!(draft.schedule, vec![ScheduleEntry::default()]);
        assert_eq!(draft.category_id.as_deref(), Some("abrigo"));
        assert_eq!(draft.position, Some(Position::new(-26.3, -48.8)));
    }

    #[test]
    fn test_fresh_draft() {
        let draft = Draft::fresh(Some("caps".to_string()));
        assert_eq!(draft.schedule.len(), 1);
        assert!(draft.position.is_none());
        assert!(!draft.is_empty());
        assert!(Draft::default().is_empty());
    }

    #[test]
    fn test_apply_fields_keeps_id() {
        let mut location = make_location("keep", vec![]);
        location.apply_fields(LocationFields {
            position: Position::new(1.0, 2.0),
            title: "Novo".to_string(),
            description: String::new(),
            category_id: "caps".to_string(),
            schedule: vec![ScheduleEntry::new("09:00", "10:00")],
            info: "fila".to_string(),
        });
        assert_eq!(location.id, "keep");
        assert_eq!(location.title, "Novo");
        assert_eq!(location.category_id, "caps");
    }
}
