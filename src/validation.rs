//! Request and state checks. Every function reports the first rule it finds
//! broken, so chaining them with `?` stops at the first failure.

use serde_json::Value;

use crate::services::db_models::{Reservation, ReservationStatus, Table};
use crate::services::messages::CreateTable;
use crate::services::payloads::{SeatDraft, TableDraft};
use crate::types::AppError;

pub fn missing_data() -> AppError {
    AppError::validation("Body must include a data object")
}

pub fn require_data<T>(data: Option<T>) -> Result<T, AppError> {
    data.ok_or_else(missing_data)
}

/// Checks `table_name` then `capacity`, in that order.
pub fn validate_new_table(draft: TableDraft) -> Result<CreateTable, AppError> {
    let table_name = match draft.table_name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::validation("'table_name' field cannot be empty")),
    };

    if table_name.chars().count() < 2 {
        return Err(AppError::validation(
            "'table_name' field must be at least 2 characters",
        ));
    }

    let capacity = validate_capacity(draft.capacity)?;

    Ok(CreateTable {
        table_name,
        capacity,
        reservation_id: draft.reservation_id.filter(is_present).map(|id| id_text(&id)),
    })
}

fn validate_capacity(capacity: Option<Value>) -> Result<i32, AppError> {
    let number = match capacity.filter(is_present) {
        None => return Err(AppError::validation("'capacity' field cannot be empty")),
        Some(Value::Number(number)) => number,
        Some(_) => return Err(AppError::validation("'capacity' field must be a number")),
    };

    if number.as_f64().map_or(true, |n| n < 1.0) {
        return Err(AppError::validation("'capacity' field must be at least 1"));
    }

    let whole = number
        .as_i64()
        .ok_or_else(|| AppError::validation("'capacity' field must be a whole number"))?;

    i32::try_from(whole).map_err(|_| AppError::validation("'capacity' field is too large"))
}

/// Returns the reservation id as text; lookup happens later.
pub fn require_reservation_id(draft: SeatDraft) -> Result<String, AppError> {
    match draft.reservation_id {
        Some(id) if is_present(&id) => Ok(id_text(&id)),
        _ => Err(AppError::validation(
            "reservation_id field must be included in the body",
        )),
    }
}

/// Seating rules, checked after both records are known to exist.
pub fn check_seat(table: &Table, reservation: &Reservation) -> Result<(), AppError> {
    if table.is_occupied() {
        return Err(AppError::validation(
            "the table you selected is currently occupied",
        ));
    }

    check_party(table.capacity, reservation)
}

/// Rules a reservation must pass before any table, new or existing, takes it.
pub fn check_party(capacity: i32, reservation: &Reservation) -> Result<(), AppError> {
    if reservation.status == ReservationStatus::Seated {
        return Err(AppError::validation(
            "this reservation is already seated to a table",
        ));
    }

    if capacity < reservation.people {
        return Err(AppError::validation(format!(
            "the table you selected does not have enough capacity to seat {} people",
            reservation.people
        )));
    }

    Ok(())
}

pub fn check_occupied(table: &Table) -> Result<(), AppError> {
    if !table.is_occupied() {
        return Err(AppError::validation("Selected table is not occupied."));
    }

    Ok(())
}

/// Ids arrive as path segments or JSON values; anything that is not an
/// integer cannot name a record.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

// a missing key, null and "" count as "not supplied"; 0 is a value
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
