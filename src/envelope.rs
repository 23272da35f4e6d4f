use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The `{status, message?, total?, data?}` wrapper around every JSON response.
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Envelope<T> {
    pub const fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            total: None,
            data: Some(data),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    #[must_use]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

impl Envelope<()> {
    pub const fn error(message: &'static str) -> Self {
        Self {
            status: Status::Error,
            message: Some(message),
            total: None,
            data: None,
        }
    }

    /// A success with nothing to return but a message, as after a delete.
    pub const fn done(message: &'static str) -> Self {
        Self {
            status: Status::Success,
            message: Some(message),
            total: None,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelope_carries_total() {
        let envelope = Envelope::success(vec![1, 2, 3]).with_total(3);
        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({"status": "success", "total": 3, "data": [1, 2, 3]})
        );
    }

    #[test]
    fn error_envelope_has_no_data() {
        assert_eq!(
            serde_json::to_value(Envelope::error("ID harus angka")).unwrap(),
            json!({"status": "error", "message": "ID harus angka"})
        );
    }
}
