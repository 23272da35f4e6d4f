use crate::{
    config::DbConfig,
    data::{Biodata, BiodataStore, NewBiodata, RecordId},
    error::{GetDatabaseConnectionSnafu, MakeQuerySnafu, StoreResult},
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{
    Connection, MySql, MySqlPool,
    mysql::MySqlPoolOptions,
    pool::PoolConnection,
};

#[derive(Clone, Debug)]
pub struct MySqlBiodataStore {
    pool: MySqlPool,
}

impl MySqlBiodataStore {
    /// Creates the pool without connecting; the first query (or [`BiodataStore::ping`]) opens a connection.
    pub fn new(options: MySqlPoolOptions, config: &DbConfig) -> Self {
        Self {
            pool: options.connect_lazy_with(config.connect_options()),
        }
    }

    async fn get_connection(&self) -> StoreResult<PoolConnection<MySql>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }
}

#[async_trait]
impl BiodataStore for MySqlBiodataStore {
    async fn list_all(&self) -> StoreResult<Vec<Biodata>> {
        let mut conn = self.get_connection().await?;
        sqlx::query_as::<_, Biodata>("SELECT id, nama, nim, kelas FROM biodata ORDER BY id ASC")
            .fetch_all(&mut *conn)
            .await
            .context(MakeQuerySnafu)
    }

    async fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Biodata>> {
        let mut conn = self.get_connection().await?;
        sqlx::query_as::<_, Biodata>("SELECT id, nama, nim, kelas FROM biodata WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .context(MakeQuerySnafu)
    }

    async fn find_by_nim(
        &self,
        nim: &str,
        exclude: Option<RecordId>,
    ) -> StoreResult<Option<RecordId>> {
        let mut conn = self.get_connection().await?;
        let query = match exclude {
            Some(exclude) => {
                sqlx::query_scalar::<_, RecordId>(
                    "SELECT id FROM biodata WHERE nim = ? AND id <> ? LIMIT 1",
                )
                .bind(nim)
                .bind(exclude)
            }
            None => sqlx::query_scalar::<_, RecordId>("SELECT id FROM biodata WHERE nim = ? LIMIT 1")
                .bind(nim),
        };

        query.fetch_optional(&mut *conn).await.context(MakeQuerySnafu)
    }

    async fn insert(&self, to_be_added: NewBiodata) -> StoreResult<Biodata> {
        let mut conn = self.get_connection().await?;
        let result = sqlx::query("INSERT INTO biodata (nama, nim, kelas) VALUES (?, ?, ?)")
            .bind(&to_be_added.nama)
            .bind(&to_be_added.nim)
            .bind(&to_be_added.kelas)
            .execute(&mut *conn)
            .await
            .context(MakeQuerySnafu)?;

        #[allow(clippy::cast_possible_wrap)] //ids come from a signed BIGINT column
        let id = result.last_insert_id() as RecordId;
        Ok(to_be_added.with_id(id))
    }

    async fn update(&self, id: RecordId, replacement: &NewBiodata) -> StoreResult<bool> {
        let mut conn = self.get_connection().await?;
        // sqlx negotiates CLIENT_FOUND_ROWS, so an unchanged row still counts as affected
        let result = sqlx::query("UPDATE biodata SET nama = ?, nim = ?, kelas = ? WHERE id = ?")
            .bind(&replacement.nama)
            .bind(&replacement.nim)
            .bind(&replacement.kelas)
            .bind(id)
            .execute(&mut *conn)
            .await
            .context(MakeQuerySnafu)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: RecordId) -> StoreResult<bool> {
        let mut conn = self.get_connection().await?;
        let result = sqlx::query("DELETE FROM biodata WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .context(MakeQuerySnafu)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.get_connection().await?;
        conn.ping().await.context(MakeQuerySnafu)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
