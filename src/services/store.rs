use diesel::QueryResult;

use crate::services::db_models::{Reservation, Table};
use crate::services::insertable::NewTable;

/// Row-level access to the `tables` and `reservations` records.
///
/// Implementations perform no business validation; callers check every
/// rule before invoking a write. Each write method is one unit: when it
/// touches both records, either both changes persist or neither does.
pub trait TableStore: Send + Sync {
    /// All tables ordered by `table_name`.
    fn list_tables(&self) -> QueryResult<Vec<Table>>;

    fn find_table(&self, table_id: i64) -> QueryResult<Option<Table>>;

    fn find_reservation(&self, reservation_id: i64) -> QueryResult<Option<Reservation>>;

    /// Persists `table`. When it carries a reservation, that reservation is
    /// marked seated first.
    fn insert_table(&self, table: NewTable) -> QueryResult<Table>;

    /// Occupies the table with the reservation and marks the reservation seated.
    fn seat_reservation(&self, table_id: i64, reservation_id: i64) -> QueryResult<()>;

    /// Marks the held reservation (if any) finished, then frees the table.
    fn release_table(&self, table_id: i64, reservation_id: Option<i64>) -> QueryResult<()>;
}
