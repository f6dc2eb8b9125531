//! Location Registry
//!
//! Local mirror of the remote location and category collections:
//! - model: categories, locations and the edit draft
//! - store: remote store contract (plus an in-memory double behind `testing`)
//! - state: synchronous state machine (filters, draft, pending deletion)
//! - registry: async orchestration of remote writes over the state

mod error;
#[cfg(any(test, feature = "testing"))]
mod memory;
mod model;
mod registry;
mod state;
mod store;


pub use error::{Operation, RegistryError, StoreError, StoreResult, ValidationError};
#[cfg(any(test, feature = "testing"))]
pub use memory::{MemoryStore, StoreCall};
pub use model::{
    Category, Draft, Location, LocationFields, Position, ScheduleEntry, ScheduleField,
    MAX_SCHEDULE_ENTRIES, MIN_SCHEDULE_ENTRIES,
};
pub use registry::{Registry, StateCell};
pub use state::{DeleteRequest, Notice, NoticeKind, RegistryState, SaveRequest};
pub use store::LocationStore;
