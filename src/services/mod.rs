use actix_web::error::JsonPayloadError;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};

use crate::types::AppError;
use crate::validation::missing_data;

pub mod db_models;
pub mod db_utils;
pub mod insertable;
#[cfg(test)]
pub mod memory_store;
pub mod messages;
pub mod payloads;
pub mod pg_handling;
pub mod store;

#[get("/healthcheck")]
pub async fn healthcheck() -> impl Responder {
    HttpResponse::Ok().body("I'm alive!")
}

/// A request without a JSON body carries no data object; anything else
/// that fails to parse reports the parser's message.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::ContentType => missing_data().into(),
        JsonPayloadError::Deserialize(ref e) if e.is_eof() && e.line() == 1 && e.column() == 0 => {
            missing_data().into()
        }
        other => AppError::validation(other.to_string()).into(),
    }
}

/// Registers every route together with the JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(healthcheck)
        .service(
            web::scope("/tables")
                .service(tables_route::list_tables)
                .service(tables_route::create_table)
                .service(tables_route::read_table)
                .service(tables_route::occupy_table)
                .service(tables_route::free_table),
        );
}

// sub-route "/tables"
pub mod tables_route {
    use actix_web::web::{Data, Json, Path};
    use actix_web::{delete, get, post, put, HttpResponse};

    use crate::services::db_utils::AppState;
    use crate::services::messages::{FetchTable, FreeTable, ListTables, OccupyTable};
    use crate::services::payloads::{CreateTableRequest, DataEnvelope, SeatRequest, StatusReply};
    use crate::types::AppError;
    use crate::validation::{require_data, require_reservation_id, validate_new_table};

    #[get("")]
    pub async fn list_tables(state: Data<AppState>) -> Result<HttpResponse, AppError> {
        let tables = state.db.send(ListTables).await??;

        Ok(HttpResponse::Ok().json(DataEnvelope::new(tables)))
    }

    #[post("")]
    pub async fn create_table(
        state: Data<AppState>,
        body: Json<CreateTableRequest>,
    ) -> Result<HttpResponse, AppError> {
        let draft = require_data(body.into_inner().data)?;
        let msg = validate_new_table(draft)?;

        let table = state.db.send(msg).await??;

        Ok(HttpResponse::Created().json(DataEnvelope::new(table)))
    }

    #[get("/{table_id}")]
    pub async fn read_table(
        state: Data<AppState>,
        path: Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let table = state.db.send(FetchTable(path.into_inner())).await??;

        Ok(HttpResponse::Ok().json(DataEnvelope::new(table)))
    }

    #[put("/{table_id}/seat")]
    pub async fn occupy_table(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<SeatRequest>,
    ) -> Result<HttpResponse, AppError> {
        let draft = require_data(body.into_inner().data)?;
        let reservation_id = require_reservation_id(draft)?;

        let status = state
            .db
            .send(OccupyTable {
                table_id: path.into_inner(),
                reservation_id,
            })
            .await??;

        Ok(HttpResponse::Ok().json(DataEnvelope::new(StatusReply { status })))
    }

    #[delete("/{table_id}/seat")]
    pub async fn free_table(
        state: Data<AppState>,
        path: Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let status = state.db.send(FreeTable(path.into_inner())).await??;

        Ok(HttpResponse::Ok().json(DataEnvelope::new(StatusReply { status })))
    }
}
