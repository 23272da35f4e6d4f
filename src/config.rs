use crate::error::{MahasiswaError, MahasiswaResult, ParsePortSnafu};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use sqlx::mysql::MySqlConnectOptions;
use std::{
    env::VarError,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    port: u16,
    db_config: Arc<DbConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> MahasiswaResult<Self> {
        Self::from_lookup(var)
    }

    /// Builds the configuration from any variable source; unset variables fall back to defaults.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> MahasiswaResult<Self> {
        let get_env_var = |name, default: &str| match lookup(name) {
            Ok(value) => Ok(value),
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(default.to_string()),
            Err(source) => Err(MahasiswaError::BadEnvVar { source, name }),
        };

        Ok(Self {
            port: parse_port("PORT", get_env_var("PORT", "3000")?)?,
            db_config: Arc::new(DbConfig {
                host: get_env_var("DB_HOST", "127.0.0.1")?,
                port: parse_port("DB_PORT", get_env_var("DB_PORT", "3306")?)?,
                user: get_env_var("DB_USER", "root")?,
                password: SecretString::from(get_env_var("DB_PASS", "")?),
                database: get_env_var("DB_NAME", "mahasiswa_db")?,
            }),
        })
    }

    pub fn server_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }
}

fn parse_port(name: &'static str, original: String) -> MahasiswaResult<u16> {
    let parsed = original.parse::<u16>();
    parsed.context(ParsePortSnafu { name, original })
}

#[derive(Debug)]
pub struct DbConfig {
    host: String,
    port: u16,
    user: String,
    password: SecretString,
    database: String,
}

impl DbConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        match self.password.expose_secret() {
            "" => options,
            password => options.password(password),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}
