use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{Queryable, Selectable};
use serde::Serialize;

use crate::schema::{reservations, tables};

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = tables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Table {
    pub table_id: i64,
    pub table_name: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub reservation_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Table {
    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Reservation {
    pub reservation_id: i64,
    pub people: i32,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Free,
    Occupied,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
        }
    }
}

impl ToSql<Text, Pg> for TableStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        <str as ToSql<Text, Pg>>::to_sql(self.as_str(), out)
    }
}

impl FromSql<Text, Pg> for TableStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "free" => Ok(TableStatus::Free),
            "occupied" => Ok(TableStatus::Occupied),
            other => Err(format!("Unrecognized table status: {other}").into()),
        }
    }
}

/// Reservation lifecycle: booked -> seated -> finished. Statuses owned by
/// other parts of the system are kept as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(into = "String")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
    Other(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Booked => "booked",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Finished => "finished",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Other(status) => status,
        }
    }
}

impl From<String> for ReservationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "booked" => ReservationStatus::Booked,
            "seated" => ReservationStatus::Seated,
            "finished" => ReservationStatus::Finished,
            "cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Other(value),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Other(status) => status,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl ToSql<Text, Pg> for ReservationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        <str as ToSql<Text, Pg>>::to_sql(self.as_str(), out)
    }
}

impl FromSql<Text, Pg> for ReservationStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        <String as FromSql<Text, Pg>>::from_sql(bytes).map(ReservationStatus::from)
    }
}
