use crate::{
    config::RuntimeConfiguration,
    data::{BiodataStore, mysql_store::MySqlBiodataStore},
    service::RecordService,
};
use sqlx::mysql::MySqlPoolOptions;
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct MahasiswaState {
    records: RecordService,
    config: RuntimeConfiguration,
}

impl MahasiswaState {
    /// Builds the pool lazily, so this never waits on the database.
    pub fn new(options: MySqlPoolOptions, config: RuntimeConfiguration) -> Self {
        let store = MySqlBiodataStore::new(options, &config.db_config());
        Self::with_store(Arc::new(store), config)
    }

    pub fn with_store(store: Arc<dyn BiodataStore>, config: RuntimeConfiguration) -> Self {
        Self {
            records: RecordService::new(store),
            config,
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    /// Pings the store in the background and logs the outcome; requests are served either way.
    pub fn spawn_connectivity_check(&self) {
        let records = self.records.clone();
        let db_config = self.config.db_config();

        tokio::spawn(async move {
            match records.ping().await {
                Ok(()) => info!(
                    host = db_config.host(),
                    database = db_config.database(),
                    "Connected to MySQL"
                ),
                Err(e) => error!(
                    ?e,
                    host = db_config.host(),
                    database = db_config.database(),
                    "Unable to connect to MySQL"
                ),
            }
        });
    }

    pub async fn sensible_shutdown(&self) {
        self.records.close().await;
        info!("Database pool closed");
    }
}

impl Deref for MahasiswaState {
    type Target = RecordService;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}
