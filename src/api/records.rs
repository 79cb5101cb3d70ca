//! Handlers shared by the plain record collections (tests, doctors, banners and
//! the reservation routes that need no owner logic). Registered per kind, e.g.
//! `records::list::<Tests>`.

use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::database::{DeleteAck, InsertAck, UpdateAck};
use crate::models::{MessageResponse, RecordKind};
use crate::services::record_service;
use crate::state::AppState;
use crate::utils::{document_to_json, AppError};

#[utoipa::path(
    get,
    path = "/{collection}",
    tag = "Records",
    params(
        ("collection" = String, Path, description = "`tests`, `doctors`, `banners`, or `reservations` (list, create and delete only)")
    ),
    responses(
        (status = 200, description = "Every record in the collection", body = [Value])
    )
)]
pub async fn list<R: RecordKind>(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /{}", R::COLLECTION);

    let records = record_service::list::<R>(state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(records.into_iter().map(document_to_json).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/{collection}/{id}",
    tag = "Records",
    params(
        ("collection" = String, Path, description = "`tests`, `doctors`, `banners`, or `reservations` (list, create and delete only)"),
        ("id" = String, Path, description = "Record ObjectId (hex)")
    ),
    responses(
        (status = 200, description = "The record", body = Value),
        (status = 404, description = "No record with that id", body = MessageResponse)
    )
)]
pub async fn get<R: RecordKind>(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /{}/{}", R::COLLECTION, id);

    let record = record_service::get::<R>(state.store.as_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(document_to_json(record)))
}

#[utoipa::path(
    post,
    path = "/{collection}",
    tag = "Records",
    params(
        ("collection" = String, Path, description = "`tests`, `doctors`, `banners`, or `reservations` (list, create and delete only)")
    ),
    request_body(content = Value, description = "Record fields; `_id` is ignored, dotted and `$` keys are rejected"),
    responses(
        (status = 200, description = "Insert acknowledgement", body = InsertAck),
        (status = 400, description = "Body is not a valid record", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create<R: RecordKind>(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /{}", R::COLLECTION);

    let ack = record_service::create::<R>(state.store.as_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    patch,
    path = "/{collection}/{id}",
    tag = "Records",
    params(
        ("collection" = String, Path, description = "`tests`, `doctors`, `banners`, or `reservations` (list, create and delete only)"),
        ("id" = String, Path, description = "Record ObjectId (hex)")
    ),
    request_body(content = Value, description = "Record fields; `_id` is ignored, dotted and `$` keys are rejected"),
    responses(
        (status = 200, description = "Fields merged into the record", body = UpdateAck),
        (status = 404, description = "No record was modified", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update<R: RecordKind>(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /{}/{}", R::COLLECTION, id);

    let ack = record_service::update::<R>(state.store.as_ref(), &id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/{collection}/{id}",
    tag = "Records",
    params(
        ("collection" = String, Path, description = "`tests`, `doctors`, `banners`, or `reservations` (list, create and delete only)"),
        ("id" = String, Path, description = "Record ObjectId (hex)")
    ),
    responses(
        (status = 200, description = "Delete acknowledgement; deletedCount is 0 for unknown ids", body = DeleteAck),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete<R: RecordKind>(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /{}/{}", R::COLLECTION, id);

    let ack = record_service::delete::<R>(state.store.as_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
