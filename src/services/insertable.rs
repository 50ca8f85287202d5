use diesel::Insertable;

use crate::schema::tables;
use crate::services::db_models::TableStatus;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = tables)]
pub struct NewTable {
    pub table_name: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub reservation_id: Option<i64>,
}

impl NewTable {
    /// A table created for `reservation_id` starts out occupied.
    pub fn new(table_name: String, capacity: i32, reservation_id: Option<i64>) -> Self {
        let status = match reservation_id {
            Some(_) => TableStatus::Occupied,
            None => TableStatus::Free,
        };

        NewTable { table_name, capacity, status, reservation_id }
    }
}
