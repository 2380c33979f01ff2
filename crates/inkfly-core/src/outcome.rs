// ── Operation outcome envelope ──
//
// Every `Studio` operation resolves to this two-state envelope rather
// than a raw `Result`. The wire shape is fixed:
//
//   { "success": true,  "data": ... }
//   { "success": false, "message": "..." }
//
// Consumers that re-serialize outcomes (the CLI's `--output json`, an
// embedding host's bridge layer) get that shape without adapters.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Outcome of a single studio operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult<T> {
    /// The operation completed and produced `data`.
    Success { data: T },
    /// The operation failed; `message` is the provider's own wording
    /// where one was given.
    Failure { message: String },
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        ApiResult::Success { data }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    /// The payload, if this outcome succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResult::Success { data } => Some(data),
            ApiResult::Failure { .. } => None,
        }
    }

    /// The failure message, if this outcome failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResult::Success { .. } => None,
            ApiResult::Failure { message } => Some(message),
        }
    }

    /// Transforms the success payload, passing failures through untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Success { data } => ApiResult::Success { data: f(data) },
            ApiResult::Failure { message } => ApiResult::Failure { message },
        }
    }
}

// Hand-rolled so the `success` flag always appears, which a derived
// internally-tagged enum would not give us for free.
impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ApiResult::Success { data } => {
                let mut state = serializer.serialize_struct("ApiResult", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            ApiResult::Failure { message } => {
                let mut state = serializer.serialize_struct("ApiResult", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}
