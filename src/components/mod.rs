//! UI Components
//!
//! Leptos components around the shared registry context.

mod delete_confirm_dialog;
mod filter_panel;
mod location_card;
mod location_form;
mod map_view;
mod notice_banner;

pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use filter_panel::FilterPanel;
pub use location_card::LocationCard;
pub use location_form::LocationForm;
pub use map_view::MapView;
pub use notice_banner::NoticeBanner;
