use std::sync::Arc;

use actix::{Addr, SyncArbiter};
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use settings::Settings;
use services::db_utils::{get_db_pool, AppState, DbActor};
use services::pg_handling::PgStore;
use services::store::TableStore;
use types::StartupError;

mod actors;
mod schema;
mod services;
mod settings;
mod types;
mod validation;


fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "table_service=info,actix_web=info".into()),
        )
        .init();
}

fn init_pg_db(settings: &Settings) -> Result<Addr<DbActor>, StartupError> {
    let pool = get_db_pool(&settings.database_url, settings.pool_size)?;
    let store: Arc<dyn TableStore> = Arc::new(PgStore(pool));

    Ok(SyncArbiter::start(settings.db_workers, move || DbActor(store.clone())))
}

fn cors_policy(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header(),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();
    init_tracing();

    let settings = Settings::from_env()?;
    let pg_db = init_pg_db(&settings)?;
    let allowed_origin = settings.allowed_origin.clone();

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        db_workers = settings.db_workers,
        "Starting table service"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(AppState { db: pg_db.clone() }))
            .wrap(cors_policy(allowed_origin.as_deref()))
            .wrap(Logger::default())
            .configure(services::configure)
    })
    .bind(settings.bind_address())?
    .run()
    .await?;

    Ok(())
}
