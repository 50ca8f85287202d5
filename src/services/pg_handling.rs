use diesel::{
    dsl::now,
    r2d2::{ConnectionManager, Pool, PooledConnection},
    result::{DatabaseErrorKind, Error},
    Connection, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, QueryResult,
    RunQueryDsl, SelectableHelper,
};

use crate::schema::{reservations, tables};
use crate::services::db_models::{Reservation, ReservationStatus, Table, TableStatus};
use crate::services::insertable::NewTable;
use crate::services::store::TableStore;

/// PostgreSQL-backed store sharing one r2d2 pool between all database actors.
#[derive(Clone)]
pub struct PgStore(pub Pool<ConnectionManager<PgConnection>>);

fn establish_connection(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<PooledConnection<ConnectionManager<PgConnection>>, Error> {
    match pool.get() {
        Ok(val) => Ok(val),
        Err(_) => Err(connection_err()),
    }
}

fn connection_err() -> Error {
    Error::DatabaseError(
        DatabaseErrorKind::ClosedConnection,
        Box::new("Failed to establish connection".to_owned()),
    )
}

/// Runs `f` as one transaction. Nested calls become savepoints, so the
/// writes stay atomic inside an enclosing test transaction as well.
fn in_transaction<T>(
    pool: &Pool<ConnectionManager<PgConnection>>,
    f: impl FnOnce(&mut PgConnection) -> QueryResult<T>,
) -> QueryResult<T> {
    let mut pooled = establish_connection(pool)?;
    let conn: &mut PgConnection = &mut pooled;

    conn.transaction(f)
}

fn set_reservation_status(
    conn: &mut PgConnection,
    reservation_id: i64,
    status: ReservationStatus,
) -> QueryResult<usize> {
    diesel::update(reservations::table.find(reservation_id))
        .set(reservations::status.eq(status))
        .execute(conn)
}

impl TableStore for PgStore {
    fn list_tables(&self) -> QueryResult<Vec<Table>> {
        let mut conn = establish_connection(&self.0)?;

        tables::table
            .order(tables::table_name.asc())
            .select(Table::as_select())
            .load(&mut conn)
    }

    fn find_table(&self, table_id: i64) -> QueryResult<Option<Table>> {
        let mut conn = establish_connection(&self.0)?;

        tables::table
            .find(table_id)
            .select(Table::as_select())
            .first(&mut conn)
            .optional()
    }

    fn find_reservation(&self, reservation_id: i64) -> QueryResult<Option<Reservation>> {
        let mut conn = establish_connection(&self.0)?;

        reservations::table
            .find(reservation_id)
            .select(Reservation::as_select())
            .first(&mut conn)
            .optional()
    }

    fn insert_table(&self, table: NewTable) -> QueryResult<Table> {
        in_transaction(&self.0, |trx_conn| {
            if let Some(reservation_id) = table.reservation_id {
                set_reservation_status(trx_conn, reservation_id, ReservationStatus::Seated)?;
            }

            diesel::insert_into(tables::table)
                .values(&table)
                .returning(Table::as_returning())
                .get_result(trx_conn)
        })
    }

    fn seat_reservation(&self, table_id: i64, reservation_id: i64) -> QueryResult<()> {
        in_transaction(&self.0, |trx_conn| {
            diesel::update(tables::table.find(table_id))
                .set((
                    tables::reservation_id.eq(Some(reservation_id)),
                    tables::status.eq(TableStatus::Occupied),
                    tables::updated_at.eq(now),
                ))
                .execute(trx_conn)?;

            set_reservation_status(trx_conn, reservation_id, ReservationStatus::Seated)?;

            Ok(())
        })
    }

    fn release_table(&self, table_id: i64, reservation_id: Option<i64>) -> QueryResult<()> {
        in_transaction(&self.0, |trx_conn| {
            if let Some(reservation_id) = reservation_id {
                set_reservation_status(trx_conn, reservation_id, ReservationStatus::Finished)?;
            }

            diesel::update(tables::table.find(table_id))
                .set((
                    tables::reservation_id.eq(None::<i64>),
                    tables::status.eq(TableStatus::Free),
                    tables::updated_at.eq(now),
                ))
                .execute(trx_conn)?;

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use diesel::connection::SimpleConnection;
    use diesel::r2d2::{self, CustomizeConnection};

    use super::*;

    const SCHEMA: &str = concat!(
        "CREATE SCHEMA table_service_test; SET LOCAL search_path TO table_service_test;",
        include_str!("../../migrations/2024-01-15-000000_create_reservations/up.sql"),
        include_str!("../../migrations/2024-01-15-000100_create_tables/up.sql"),
    );

    #[derive(Debug)]
    struct TestTransaction;

    impl CustomizeConnection<PgConnection, r2d2::Error> for TestTransaction {
        fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), r2d2::Error> {
            conn.begin_test_transaction().map_err(r2d2::Error::QueryError)
        }
    }

    /// Store over a single connection whose work is rolled back when the
    /// store is dropped. `None` when `TEST_DATABASE_URL` is not set.
    fn test_store() -> Option<PgStore> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        };

        let pool = Pool::builder()
            .max_size(1)
            .connection_customizer(Box::new(TestTransaction))
            .build(ConnectionManager::<PgConnection>::new(url))
            .expect("test database pool");
        pool.get().unwrap().batch_execute(SCHEMA).unwrap();

        Some(PgStore(pool))
    }

    fn add_reservation(store: &PgStore, people: i32) -> i64 {
        let mut conn = store.0.get().unwrap();

        diesel::insert_into(reservations::table)
            .values((
                reservations::people.eq(people),
                reservations::status.eq(ReservationStatus::Booked),
            ))
            .returning(reservations::reservation_id)
            .get_result(&mut conn)
            .unwrap()
    }

    fn reservation_status(store: &PgStore, reservation_id: i64) -> ReservationStatus {
        store.find_reservation(reservation_id).unwrap().unwrap().status
    }

    #[test]
    fn seat_and_release_update_both_rows() {
        let Some(store) = test_store() else { return };
        let reservation_id = add_reservation(&store, 4);
        let table = store.insert_table(NewTable::new("Window".into(), 4, None)).unwrap();
        assert_eq!(table.status, TableStatus::Free);

        store.seat_reservation(table.table_id, reservation_id).unwrap();

        let seated = store.find_table(table.table_id).unwrap().unwrap();
        assert_eq!(seated.status, TableStatus::Occupied);
        assert_eq!(seated.reservation_id, Some(reservation_id));
        assert_eq!(reservation_status(&store, reservation_id), ReservationStatus::Seated);

        store.release_table(table.table_id, seated.reservation_id).unwrap();

        let freed = store.find_table(table.table_id).unwrap().unwrap();
        assert_eq!(freed.status, TableStatus::Free);
        assert_eq!(freed.reservation_id, None);
        assert_eq!(reservation_status(&store, reservation_id), ReservationStatus::Finished);
    }

    #[test]
    fn failed_insert_rolls_back_reservation_update() {
        let Some(store) = test_store() else { return };
        let reservation_id = add_reservation(&store, 2);

        // capacity 0 violates the CHECK constraint after the reservation write
        let rejected = NewTable::new("Patio".into(), 0, Some(reservation_id));
        assert!(store.insert_table(rejected).is_err());

        assert_eq!(reservation_status(&store, reservation_id), ReservationStatus::Booked);
        assert!(store.list_tables().unwrap().is_empty());
    }

    #[test]
    fn insert_with_reservation_seats_it() {
        let Some(store) = test_store() else { return };
        let reservation_id = add_reservation(&store, 2);

        let table = store
            .insert_table(NewTable::new("Corner".into(), 2, Some(reservation_id)))
            .unwrap();

        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.reservation_id, Some(reservation_id));
        assert_eq!(reservation_status(&store, reservation_id), ReservationStatus::Seated);
    }

    #[test]
    fn list_is_ordered_by_table_name() {
        let Some(store) = test_store() else { return };
        for name in ["Patio", "Bar #2", "Bar #1"] {
            store.insert_table(NewTable::new(name.into(), 2, None)).unwrap();
        }

        let names: Vec<String> = store
            .list_tables()
            .unwrap()
            .into_iter()
            .map(|t| t.table_name)
            .collect();
        assert_eq!(names, ["Bar #1", "Bar #2", "Patio"]);
    }

    #[test]
    fn long_table_names_are_stored() {
        let Some(store) = test_store() else { return };
        let name = "x".repeat(120);

        let table = store.insert_table(NewTable::new(name.clone(), 2, None)).unwrap();

        assert_eq!(store.find_table(table.table_id).unwrap().unwrap().table_name, name);
    }

    #[test]
    fn missing_rows_are_none() {
        let Some(store) = test_store() else { return };

        assert!(store.find_table(404).unwrap().is_none());
        assert!(store.find_reservation(404).unwrap().is_none());
    }
}
