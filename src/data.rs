use crate::error::StoreResult;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod biodata;
#[cfg(test)]
pub mod memory_store;
pub mod mysql_store;

pub use biodata::{Biodata, BiodataForm, NewBiodata, RecordId};

/// Single-statement access to the `biodata` table. No operation spans a transaction.
#[async_trait]
pub trait BiodataStore: Debug + Send + Sync {
    /// Every record, ascending by id.
    async fn list_all(&self) -> StoreResult<Vec<Biodata>>;
    async fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Biodata>>;
    /// The id of a record holding `nim`, skipping `exclude` when given.
    async fn find_by_nim(&self, nim: &str, exclude: Option<RecordId>)
    -> StoreResult<Option<RecordId>>;
    async fn insert(&self, to_be_added: NewBiodata) -> StoreResult<Biodata>;
    /// Returns whether a row matched `id`.
    async fn update(&self, id: RecordId, replacement: &NewBiodata) -> StoreResult<bool>;
    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
    async fn close(&self);
}
