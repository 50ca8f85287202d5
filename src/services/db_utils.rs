use std::sync::Arc;

use actix::{Actor, Addr, SyncContext};
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::PgConnection;

use crate::services::store::TableStore;

/// Synchronous worker that owns a handle to the table store. Started on a
/// `SyncArbiter` so blocking diesel calls stay off the HTTP workers.
pub struct DbActor(pub Arc<dyn TableStore>);

pub struct AppState {
    pub db: Addr<DbActor>,
}

impl Actor for DbActor {
    type Context = SyncContext<Self>;
}

pub fn get_db_pool(
    db_url: &str,
    max_size: u32,
) -> Result<Pool<ConnectionManager<PgConnection>>, PoolError> {
    let manager: ConnectionManager<PgConnection> = ConnectionManager::<PgConnection>::new(db_url);
    Pool::builder().max_size(max_size).build(manager)
}
