use crate::{envelope::Envelope, views::message_page};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::{fmt, net::SocketAddr, num::ParseIntError};

pub type MahasiswaResult<T> = Result<T, MahasiswaError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// What the caller was doing when the store failed, used to pick the public message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Read => "Gagal mengambil data",
            Self::Create => "Gagal menambahkan data ke database",
            Self::Update => "Gagal memperbarui data",
            Self::Delete => "Gagal menghapus data",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Read => "read biodata",
            Self::Create => "create biodata",
            Self::Update => "update biodata",
            Self::Delete => "delete biodata",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
}

impl StoreError {
    /// Whether the store rejected a write because of a unique key, i.e. the `nim` constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::MakeQuery {
                source: sqlx::Error::Database(db_error),
            } => db_error.is_unique_violation(),
            _ => false,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum MahasiswaError {
    #[snafu(display("ID {id:?} is not made up of digits only"))]
    InvalidId { id: String },
    #[snafu(display("One of nama, nim or kelas was missing or empty"))]
    MissingFields,
    #[snafu(display("Unable to read request body: {reason}"))]
    MalformedBody { reason: String },
    #[snafu(display("Unable to find biodata with ID: {id}"))]
    MissingRecord { id: String },
    #[snafu(display("NIM {nim:?} is already registered"))]
    NimRegistered { nim: String },
    #[snafu(display("NIM {nim:?} already belongs to another record"))]
    NimInUse { nim: String },
    #[snafu(display("Store failure while trying to {op}"))]
    Persistence { source: StoreError, op: Operation },
    #[snafu(display("Error serialising records for the page"))]
    SerialiseRecords { source: serde_json::Error },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{name}` value {original:?} as a port"))]
    ParsePort {
        source: ParseIntError,
        name: &'static str,
        original: String,
    },
    #[snafu(display("Unable to listen on {address}"))]
    BindListener {
        source: std::io::Error,
        address: SocketAddr,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
}

impl MahasiswaError {
    #[allow(clippy::match_same_arms)]
    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const CF: StatusCode = StatusCode::CONFLICT;

        match self {
            Self::InvalidId { .. } | Self::MissingFields | Self::MalformedBody { .. } => BI,
            Self::MissingRecord { .. } => NF,
            Self::NimRegistered { .. } | Self::NimInUse { .. } => CF,
            Self::Persistence { .. } | Self::SerialiseRecords { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } => ISE,
            Self::BindListener { .. } | Self::Serve { .. } => ISE,
        }
    }

    /// The message shown to clients. Internal detail stays in the logs.
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "ID harus angka",
            Self::MissingFields => "Semua field (nama, nim, kelas) wajib diisi",
            Self::MalformedBody { .. } => "Body permintaan tidak valid",
            Self::MissingRecord { .. } => "Data tidak ditemukan",
            Self::NimRegistered { .. } => "NIM sudah terdaftar",
            Self::NimInUse { .. } => "NIM sudah terpakai",
            Self::Persistence { op, .. } => op.failure_message(),
            Self::SerialiseRecords { .. } => Operation::Read.failure_message(),
            Self::BadEnvVar { .. }
            | Self::ParsePort { .. }
            | Self::BindListener { .. }
            | Self::Serve { .. } => "Terjadi kesalahan pada server",
        }
    }

    fn log(&self) -> StatusCode {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(%self, %status_code, "Rejected request");
        }
        status_code
    }
}

/// Shapes a [`MahasiswaError`] as a JSON error envelope.
#[derive(Debug)]
pub struct ApiError(pub MahasiswaError);

impl From<MahasiswaError> for ApiError {
    fn from(value: MahasiswaError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.0.log();
        (status_code, Json(Envelope::error(self.0.public_message()))).into_response()
    }
}

/// Shapes a [`MahasiswaError`] as an HTML page, for the browser-facing routes.
#[derive(Debug)]
pub struct PageError(pub MahasiswaError);

impl From<MahasiswaError> for PageError {
    fn from(value: MahasiswaError) -> Self {
        Self(value)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status_code = self.0.log();
        let title = if status_code == StatusCode::NOT_FOUND {
            "404"
        } else {
            "Error"
        };
        (status_code, message_page(title, self.0.public_message())).into_response()
    }
}
