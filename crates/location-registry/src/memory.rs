//! In-Memory Store
//!
//! `LocationStore` backed by plain vectors. Records every call and can be
//! switched into failure mode, which is what the registry tests rely on.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::model::{Category, Location, LocationFields};
use crate::store::LocationStore;

/// A call received by the store, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    ListCategories,
    ListLocations,
    Create(LocationFields),
    Update(String, LocationFields),
    Delete(String),
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        matches!(self, StoreCall::Create(_) | StoreCall::Update(..) | StoreCall::Delete(_))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: RefCell<Vec<Category>>,
    locations: RefCell<Vec<Location>>,
    calls: RefCell<Vec<StoreCall>>,
    next_id: Cell<u32>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        *self.categories.borrow_mut() = categories;
        self
    }

    pub fn with_locations(self, locations: Vec<Location>) -> Self {
        *self.locations.borrow_mut() = locations;
        self
    }

    /// Make list calls fail with `StoreError::Unavailable`
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make create/update/delete fail with `StoreError::Write`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    pub fn write_calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().iter().filter(|c| c.is_write()).cloned().collect()
    }

    /// Snapshot of the stored documents
    pub fn locations(&self) -> Vec<Location> {
        self.locations.borrow().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.borrow_mut().push(call);
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads.get() {
            return Err(StoreError::unavailable("memory store is offline"));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::write("memory store rejected the write"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl LocationStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.record(StoreCall::ListCategories);
        self.check_read()?;
        Ok(self.categories.borrow().clone())
    }

    async fn list_locations(&self) -> StoreResult<Vec<Location>> {
        self.record(StoreCall::ListLocations);
        self.check_read()?;
        Ok(self.locations.borrow().clone())
    }

    async fn create_location(&self, fields: &LocationFields) -> StoreResult<String> {
        self.record(StoreCall::Create(fields.clone()));
        self.check_write()?;

        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        let id = format!("loc{}", next);
        self.locations
            .borrow_mut()
            .push(Location::from_fields(id.clone(), fields.clone()));
        Ok(id)
    }

    async fn update_location(&self, id: &str, fields: &LocationFields) -> StoreResult<()> {
        self.record(StoreCall::Update(id.to_string(), fields.clone()));
        self.check_write()?;

        let mut locations = self.locations.borrow_mut();
        let location = locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        location.apply_fields(fields.clone());
        Ok(())
    }

    async fn delete_location(&self, id: &str) -> StoreResult<()> {
        self.record(StoreCall::Delete(id.to_string()));
        self.check_write()?;

        self.locations.borrow_mut().retain(|l| l.id != id);
        Ok(())
    }
}
