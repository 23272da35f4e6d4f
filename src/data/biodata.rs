use crate::error::{MahasiswaResult, MissingFieldsSnafu};
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

pub type RecordId = i64;

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Biodata {
    pub id: RecordId,
    pub nama: String,
    pub nim: String,
    pub kelas: String,
}

/// A record that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBiodata {
    pub nama: String,
    pub nim: String,
    pub kelas: String,
}

impl NewBiodata {
    pub fn with_id(self, id: RecordId) -> Biodata {
        let Self { nama, nim, kelas } = self;
        Biodata {
            id,
            nama,
            nim,
            kelas,
        }
    }
}

/// A text field as clients send it: JSON numbers are taken as their textual form.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    Number(serde_json::Number),
}

impl TextField {
    fn into_non_empty(self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text),
            // zero is falsy for the clients this mirrors, so it counts as missing
            Self::Number(number) if number.as_f64() == Some(0.0) => None,
            Self::Number(number) => Some(number_text(&number)),
        }
    }
}

/// Integral floats lose their fraction (`1.0` becomes `"1"`), as a JavaScript client would print them.
fn number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if !number.is_i64() && !number.is_u64() && float.fract() == 0.0 && float.abs() < 1e21 => {
            format!("{float:.0}")
        }
        _ => number.to_string(),
    }
}

/// Raw create/replace body. Every field may be missing, null or empty until validated.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct BiodataForm {
    pub nama: Option<TextField>,
    pub nim: Option<TextField>,
    pub kelas: Option<TextField>,
}

impl BiodataForm {
    pub fn new(nama: &str, nim: &str, kelas: &str) -> Self {
        let field = |value: &str| Some(TextField::Text(value.to_string()));
        Self {
            nama: field(nama),
            nim: field(nim),
            kelas: field(kelas),
        }
    }

    pub fn validate(self) -> MahasiswaResult<NewBiodata> {
        let required = |field: Option<TextField>| {
            field
                .and_then(TextField::into_non_empty)
                .context(MissingFieldsSnafu)
        };

        Ok(NewBiodata {
            nama: required(self.nama)?,
            nim: required(self.nim)?,
            kelas: required(self.kelas)?,
        })
    }
}
