//! Application Configuration
//!
//! Embedded from `config/app.json` at build time. Missing keys fall back to
//! the defaults below.

use log::LevelFilter;
use serde::Deserialize;

const EMBEDDED: &str = include_str!("../config/app.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub app_name: String,
    pub title: String,
    pub log_level: String,
    pub log_capacity: usize,
    pub firestore: FirestoreConfig,
    pub map: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "MapaSolidario".to_string(),
            title: "Conectar e Ajudar: Mapa Solidário".to_string(),
            log_level: "info".to_string(),
            log_capacity: 500,
            firestore: FirestoreConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Unknown level names fall back to `info`
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    pub api_key: String,
    pub locations_collection: String,
    pub categories_collection: String,
    pub page_size: u32,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            project_id: String::new(),
            database: "(default)".to_string(),
            api_key: String::new(),
            locations_collection: "locais".to_string(),
            categories_collection: "categorias".to_string(),
            page_size: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// [lat, lon]
    pub center: [f64; 2],
    pub zoom: f64,
    /// [[south, west], [north, east]]
    pub max_bounds: [[f64; 2]; 2],
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [-26.292977, -48.848306],
            zoom: 13.0,
            max_bounds: [[-26.6, -49.2], [-25.8, -48.5]],
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::embedded().expect("config/app.json should parse");
        assert_eq!(config.firestore.locations_collection, "locais");
        assert_eq!(config.map.max_bounds, [[-26.6, -49.2], [-25.8, -48.5]]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(r#"{"firestore": {"projectId": "mapa-teste"}, "map": {"zoom": 11}}"#)
            .expect("parse");
        assert_eq!(config.firestore.project_id, "mapa-teste");
        assert_eq!(config.firestore.categories_collection, "categorias");
        assert_eq!(config.map.zoom, 11.0);
        assert_eq!(config.map.center, [-26.292977, -48.848306]);
        assert_eq!(config.log_capacity, 500);
    }

    #[test]
    fn test_level_filter() {
        let mut config = AppConfig::default();
        assert_eq!(config.level_filter(), LevelFilter::Info);
        config.log_level = "debug".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        config.log_level = "loud".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
