//! Remote Store Contract
//!
//! Abstract interface over the two remote document collections.
//! Implementations can talk to Firestore, keep everything in memory, etc.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{Category, Location, LocationFields};

/// Document collection access used by the registry
///
/// Each call is an independent async operation with no ordering guarantee
/// relative to the others. Futures are not required to be `Send` since the
/// browser runtime is single-threaded.
#[async_trait(?Send)]
pub trait LocationStore {
    /// Fetch every category document
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Fetch every location document
    async fn list_locations(&self) -> StoreResult<Vec<Location>>;

    /// Create a location, returning the id assigned by the store
    async fn create_location(&self, fields: &LocationFields) -> StoreResult<String>;

    /// Replace the fields of an existing location
    async fn update_location(&self, id: &str, fields: &LocationFields) -> StoreResult<()>;

    /// Remove a location
    async fn delete_location(&self, id: &str) -> StoreResult<()>;
}
