use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::db_models::ReservationStatus;

/// `{ "data": ... }` wrapper used by every success response.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        DataEnvelope { data }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusReply {
    pub status: ReservationStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTableRequest {
    pub data: Option<TableDraft>,
}

/// Create payload before validation. `capacity` and `reservation_id` stay
/// untyped so each rule can report its own message.
#[derive(Debug, Default, Deserialize)]
pub struct TableDraft {
    pub table_name: Option<String>,
    pub capacity: Option<Value>,
    pub reservation_id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeatRequest {
    pub data: Option<SeatDraft>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeatDraft {
    pub reservation_id: Option<Value>,
}
