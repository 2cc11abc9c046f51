//! JSON envelope for collection and creation responses.

use serde::Serialize;

/// Wraps a payload as `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
