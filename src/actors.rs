use actix::Handler;

use crate::services::db_models::{Reservation, ReservationStatus, Table};
use crate::services::db_utils::DbActor;
use crate::services::insertable::NewTable;
use crate::services::messages::{CreateTable, FetchTable, FreeTable, ListTables, OccupyTable};
use crate::types::AppError;
use crate::validation::{check_occupied, check_party, check_seat, parse_id};

impl DbActor {
    fn table(&self, raw_id: &str) -> Result<Table, AppError> {
        parse_id(raw_id)
            .map(|id| self.0.find_table(id))
            .transpose()?
            .flatten()
            .ok_or_else(|| AppError::not_found(format!("table id {raw_id} does not exist")))
    }

    fn reservation(&self, raw_id: &str) -> Result<Reservation, AppError> {
        parse_id(raw_id)
            .map(|id| self.0.find_reservation(id))
            .transpose()?
            .flatten()
            .ok_or_else(|| {
                AppError::not_found(format!("reservation_id {raw_id} does not exist"))
            })
    }
}

impl Handler<ListTables> for DbActor {
    type Result = Result<Vec<Table>, AppError>;

    fn handle(&mut self, _msg: ListTables, _ctx: &mut Self::Context) -> Self::Result {
        Ok(self.0.list_tables()?)
    }
}

impl Handler<FetchTable> for DbActor {
    type Result = Result<Table, AppError>;

    fn handle(&mut self, msg: FetchTable, _ctx: &mut Self::Context) -> Self::Result {
        self.table(&msg.0)
    }
}

impl Handler<CreateTable> for DbActor {
    type Result = Result<Table, AppError>;

    fn handle(&mut self, msg: CreateTable, _ctx: &mut Self::Context) -> Self::Result {
        let reservation_id = match msg.reservation_id {
            Some(raw_id) => {
                let reservation = self.reservation(&raw_id)?;
                check_party(msg.capacity, &reservation)?;
                Some(reservation.reservation_id)
            }
            None => None,
        };

        let table = self
            .0
            .insert_table(NewTable::new(msg.table_name, msg.capacity, reservation_id))?;

        tracing::info!(
            table_id = table.table_id,
            table_name = %table.table_name,
            status = table.status.as_str(),
            "Table created"
        );

        Ok(table)
    }
}

impl Handler<OccupyTable> for DbActor {
    type Result = Result<ReservationStatus, AppError>;

    fn handle(&mut self, msg: OccupyTable, _ctx: &mut Self::Context) -> Self::Result {
        let table = self.table(&msg.table_id)?;
        let reservation = self.reservation(&msg.reservation_id)?;

        check_seat(&table, &reservation)?;

        self.0
            .seat_reservation(table.table_id, reservation.reservation_id)?;

        tracing::info!(
            table_id = table.table_id,
            reservation_id = reservation.reservation_id,
            people = reservation.people,
            "Reservation seated"
        );

        Ok(ReservationStatus::Seated)
    }
}

impl Handler<FreeTable> for DbActor {
    type Result = Result<ReservationStatus, AppError>;

    fn handle(&mut self, msg: FreeTable, _ctx: &mut Self::Context) -> Self::Result {
        let table = self.table(&msg.0)?;

        check_occupied(&table)?;

        if table.reservation_id.is_none() {
            tracing::warn!(table_id = table.table_id, "Occupied table holds no reservation");
        }

        self.0.release_table(table.table_id, table.reservation_id)?;

        tracing::info!(
            table_id = table.table_id,
            reservation_id = ?table.reservation_id,
            "Table freed"
        );

        Ok(ReservationStatus::Finished)
    }
}
