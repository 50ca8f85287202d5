use actix::Message;

use crate::services::db_models::{ReservationStatus, Table};
use crate::types::AppError;

#[derive(Message)]
#[rtype(result = "Result<Vec<Table>, AppError>")]
pub struct ListTables;

/// Table id exactly as it appeared in the request path.
#[derive(Message)]
#[rtype(result = "Result<Table, AppError>")]
pub struct FetchTable(pub String);

/// Already-validated payload of a create request.
#[derive(Message, Debug, PartialEq)]
#[rtype(result = "Result<Table, AppError>")]
pub struct CreateTable {
    pub table_name: String,
    pub capacity: i32,
    pub reservation_id: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Result<ReservationStatus, AppError>")]
pub struct OccupyTable {
    pub table_id: String,
    pub reservation_id: String,
}

#[derive(Message)]
#[rtype(result = "Result<ReservationStatus, AppError>")]
pub struct FreeTable(pub String);
