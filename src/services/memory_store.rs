use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use diesel::QueryResult;

use crate::services::db_models::{Reservation, ReservationStatus, Table, TableStatus};
use crate::services::insertable::NewTable;
use crate::services::store::TableStore;

/// In-process stand-in for PostgreSQL used by the endpoint tests.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Rows>,
}

#[derive(Default)]
struct Rows {
    tables: Vec<Table>,
    reservations: Vec<Reservation>,
    next_table_id: i64,
}

impl Rows {
    fn set_reservation_status(&mut self, reservation_id: i64, status: ReservationStatus) {
        if let Some(reservation) = self
            .reservations
            .iter_mut()
            .find(|r| r.reservation_id == reservation_id)
        {
            reservation.status = status;
        }
    }

    fn table_mut(&mut self, table_id: i64) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.table_id == table_id)
    }
}

impl MemoryStore {
    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        MemoryStore {
            rows: Mutex::new(Rows { reservations, ..Rows::default() }),
        }
    }

    fn rows(&self) -> MutexGuard<'_, Rows> {
        self.rows.lock().expect("memory store lock poisoned")
    }
}

impl TableStore for MemoryStore {
    fn list_tables(&self) -> QueryResult<Vec<Table>> {
        let mut tables = self.rows().tables.clone();
        tables.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        Ok(tables)
    }

    fn find_table(&self, table_id: i64) -> QueryResult<Option<Table>> {
        Ok(self.rows().tables.iter().find(|t| t.table_id == table_id).cloned())
    }

    fn find_reservation(&self, reservation_id: i64) -> QueryResult<Option<Reservation>> {
        Ok(self
            .rows()
            .reservations
            .iter()
            .find(|r| r.reservation_id == reservation_id)
            .cloned())
    }

    fn insert_table(&self, table: NewTable) -> QueryResult<Table> {
        let mut rows = self.rows();

        if let Some(reservation_id) = table.reservation_id {
            rows.set_reservation_status(reservation_id, ReservationStatus::Seated);
        }

        rows.next_table_id += 1;
        let stamp = Utc::now().naive_utc();
        let created = Table {
            table_id: rows.next_table_id,
            table_name: table.table_name,
            capacity: table.capacity,
            status: table.status,
            reservation_id: table.reservation_id,
            created_at: stamp,
            updated_at: stamp,
        };
        rows.tables.push(created.clone());

        Ok(created)
    }

    fn seat_reservation(&self, table_id: i64, reservation_id: i64) -> QueryResult<()> {
        let mut rows = self.rows();

        if let Some(table) = rows.table_mut(table_id) {
            table.reservation_id = Some(reservation_id);
            table.status = TableStatus::Occupied;
            table.updated_at = Utc::now().naive_utc();
        }
        rows.set_reservation_status(reservation_id, ReservationStatus::Seated);

        Ok(())
    }

    fn release_table(&self, table_id: i64, reservation_id: Option<i64>) -> QueryResult<()> {
        let mut rows = self.rows();

        if let Some(reservation_id) = reservation_id {
            rows.set_reservation_status(reservation_id, ReservationStatus::Finished);
        }
        if let Some(table) = rows.table_mut(table_id) {
            table.reservation_id = None;
            table.status = TableStatus::Free;
            table.updated_at = Utc::now().naive_utc();
        }

        Ok(())
    }
}
