//! Validation and business rules between the HTTP handlers and the [`BiodataStore`].
//!
//! Every id arrives as the raw path segment and must be a plain run of ASCII digits; every
//! body field must be present and non-empty. Both checks happen before the store is touched.
//!
//! NIM uniqueness is checked with a lookup before the write, which is not atomic: two
//! concurrent writers with the same NIM can both pass the lookup. A `UNIQUE` index on
//! `biodata.nim` closes that window, and its violation is reported as the same conflict.

use crate::{
    data::{Biodata, BiodataForm, BiodataStore, RecordId},
    error::{
        InvalidIdSnafu, MahasiswaError, MahasiswaResult, MissingRecordSnafu, NimInUseSnafu,
        NimRegisteredSnafu, Operation, PersistenceSnafu, StoreError,
    },
};
use snafu::{OptionExt, ResultExt, ensure};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RecordService {
    store: Arc<dyn BiodataStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn BiodataStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> MahasiswaResult<Vec<Biodata>> {
        self.store
            .list_all()
            .await
            .context(PersistenceSnafu { op: Operation::Read })
    }

    pub async fn get(&self, id: &str) -> MahasiswaResult<Biodata> {
        let id = parse_id(id)?;
        self.store
            .get_by_id(id)
            .await
            .context(PersistenceSnafu { op: Operation::Read })?
            .context(MissingRecordSnafu { id: id.to_string() })
    }

    pub async fn create(&self, form: BiodataForm) -> MahasiswaResult<Biodata> {
        let to_be_added = form.validate()?;
        let op = Operation::Create;

        let existing = self
            .store
            .find_by_nim(&to_be_added.nim, None)
            .await
            .context(PersistenceSnafu { op })?;
        ensure!(
            existing.is_none(),
            NimRegisteredSnafu {
                nim: to_be_added.nim
            }
        );

        let nim = to_be_added.nim.clone();
        let record = self
            .store
            .insert(to_be_added)
            .await
            .map_err(|source| {
                conflict_or_persistence(source, op, || NimRegisteredSnafu { nim }.build())
            })?;

        info!(id = record.id, nim = %record.nim, "Added biodata");
        Ok(record)
    }

    pub async fn replace(&self, id: &str, form: BiodataForm) -> MahasiswaResult<Biodata> {
        let id = parse_id(id)?;
        let replacement = form.validate()?;
        let op = Operation::Update;

        let holder = self
            .store
            .find_by_nim(&replacement.nim, Some(id))
            .await
            .context(PersistenceSnafu { op })?;
        ensure!(
            holder.is_none(),
            NimInUseSnafu {
                nim: replacement.nim
            }
        );

        let matched = self
            .store
            .update(id, &replacement)
            .await
            .map_err(|source| {
                conflict_or_persistence(source, op, || {
                    NimInUseSnafu {
                        nim: replacement.nim.clone(),
                    }
                    .build()
                })
            })?;
        ensure!(matched, MissingRecordSnafu { id: id.to_string() });

        let record = self
            .store
            .get_by_id(id)
            .await
            .context(PersistenceSnafu { op })?
            .context(MissingRecordSnafu { id: id.to_string() })?;

        info!(id, nim = %record.nim, "Replaced biodata");
        Ok(record)
    }

    pub async fn remove(&self, id: &str) -> MahasiswaResult<()> {
        let id = parse_id(id)?;
        let removed = self
            .store
            .delete_by_id(id)
            .await
            .context(PersistenceSnafu {
                op: Operation::Delete,
            })?;
        ensure!(removed, MissingRecordSnafu { id: id.to_string() });

        info!(id, "Removed biodata");
        Ok(())
    }

    pub async fn ping(&self) -> MahasiswaResult<()> {
        self.store
            .ping()
            .await
            .context(PersistenceSnafu { op: Operation::Read })
    }

    pub async fn close(&self) {
        self.store.close().await;
    }
}

/// Accepts only `^[0-9]+$`. Digit strings too long for a [`RecordId`] cannot name a stored row.
fn parse_id(raw: &str) -> MahasiswaResult<RecordId> {
    ensure!(
        !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()),
        InvalidIdSnafu { id: raw }
    );
    raw.parse().ok().context(MissingRecordSnafu { id: raw })
}

fn conflict_or_persistence(
    source: StoreError,
    op: Operation,
    conflict: impl FnOnce() -> MahasiswaError,
) -> MahasiswaError {
    if source.is_unique_violation() {
        warn!(?source, "Store rejected a duplicate NIM after the lookup passed");
        conflict()
    } else {
        MahasiswaError::Persistence { source, op }
    }
}
