use crate::{
    data::{Biodata, BiodataStore, NewBiodata, RecordId},
    error::{StoreError, StoreResult},
};
use async_trait::async_trait;
use std::{
    borrow::Cow,
    collections::BTreeMap,
    error::Error,
    fmt,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

/// In-process stand-in for the MySQL table, with hooks for failure injection.
#[derive(Debug, Default)]
pub struct MemoryBiodataStore {
    rows: Mutex<BTreeMap<RecordId, Biodata>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    unavailable: AtomicBool,
    stale_lookups: AtomicBool,
}

impl MemoryBiodataStore {
    /// How many store operations have been attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every following operation fail as if the pool were closed.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// NIM lookups miss every row while writes still hit the unique index, as when another
    /// writer commits between the lookup and the write.
    pub fn set_stale_lookups(&self, stale: bool) {
        self.stale_lookups.store(stale, Ordering::SeqCst);
    }

    fn unique_nim(&self, nim: &str, id: Option<RecordId>) -> StoreResult<()> {
        let taken = self
            .rows
            .lock()
            .unwrap()
            .values()
            .any(|row| row.nim == nim && Some(row.id) != id);
        if taken {
            return Err(StoreError::MakeQuery {
                source: sqlx::Error::Database(Box::new(DuplicateEntry(nim.to_string()))),
            });
        }
        Ok(())
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::GetDatabaseConnection {
                source: sqlx::Error::PoolClosed,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BiodataStore for MemoryBiodataStore {
    async fn list_all(&self) -> StoreResult<Vec<Biodata>> {
        self.enter()?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Biodata>> {
        self.enter()?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_nim(
        &self,
        nim: &str,
        exclude: Option<RecordId>,
    ) -> StoreResult<Option<RecordId>> {
        self.enter()?;
        if self.stale_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|row| row.nim == nim && Some(row.id) != exclude)
            .map(|row| row.id))
    }

    async fn insert(&self, to_be_added: NewBiodata) -> StoreResult<Biodata> {
        self.enter()?;
        self.unique_nim(&to_be_added.nim, None)?;
        let id = RecordId::try_from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1).unwrap();
        let record = to_be_added.with_id(id);
        self.rows.lock().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: RecordId, replacement: &NewBiodata) -> StoreResult<bool> {
        self.enter()?;
        self.unique_nim(&replacement.nim, Some(id))?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get_mut(&id)
            .map(|row| *row = replacement.clone().with_id(id))
            .is_some())
    }

    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool> {
        self.enter()?;
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.enter()
    }

    async fn close(&self) {}
}

/// What MySQL reports (error 1062) when a write breaks `UNIQUE(nim)`.
#[derive(Debug)]
pub struct DuplicateEntry(pub String);

impl fmt::Display for DuplicateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duplicate entry '{}' for key 'biodata.nim'", self.0)
    }
}

impl Error for DuplicateEntry {}

impl sqlx::error::DatabaseError for DuplicateEntry {
    fn message(&self) -> &str {
        "Duplicate entry for key 'biodata.nim'"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23000"))
    }

    fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        sqlx::error::ErrorKind::UniqueViolation
    }
}
