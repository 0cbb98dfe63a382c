//! Custom axum extractors for Scribe

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::Error;

/// Maximum page size for list endpoints
const MAX_LIMIT: i64 = 100;

/// Pagination query parameters for list endpoints.
///
/// A missing `limit` means "everything from `offset` on".
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Get the offset, defaulting to 0
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Get the limit if one was requested, capped at 100
    pub fn limit(&self) -> Option<i64> {
        self.limit.map(|l| l.clamp(1, MAX_LIMIT))
    }

    /// Compute the navigation offsets for a listing of `total` rows
    pub fn page(&self, total: i64) -> Page {
        match self.limit() {
            Some(limit) => {
                let offset = self.offset();
                let next = offset.saturating_add(limit);
                Page {
                    next_offset: if next >= total { 0 } else { next },
                    previous_offset: offset,
                }
            }
            None => Page {
                next_offset: total,
                previous_offset: 0,
            },
        }
    }
}

/// Navigation offsets returned alongside a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub next_offset: i64,
    pub previous_offset: i64,
}

/// JSON body that has passed its `validator` rules.
///
/// Bad JSON and failed rules both reject with 400 and a JSON error body
/// naming the offending fields.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Comma-separated, sorted list of the fields that failed validation
fn invalid_fields(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
    fields.sort_unstable();
    fields.join(", ")
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| Error::Validation(e.body_text()))?;

        value.validate().map_err(|e| {
            Error::Validation(format!("Invalid fields: {}", invalid_fields(&e)))
        })?;

        Ok(ValidatedJson(value))
    }
}
