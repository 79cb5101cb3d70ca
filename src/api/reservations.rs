use actix_web::{web, HttpResponse};

use crate::database::UpdateAck;
use crate::models::{MessageResponse, StatusUpdate};
use crate::services::reservation_service;
use crate::state::AppState;
use crate::utils::{document_to_json, AppError};

#[utoipa::path(
    get,
    path = "/reservations/{email}",
    tag = "Reservations",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Reservations owned by the email, possibly empty")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_for_owner(
    state: web::Data<AppState>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /reservations/{}", email);

    let reservations = reservation_service::for_owner(state.store.as_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(
        reservations
            .into_iter()
            .map(document_to_json)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    patch,
    path = "/reservations/{id}",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ObjectId")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = UpdateAck),
        (status = 404, description = "No such reservation", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_status(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /reservations/{} - {}", id, body.status);

    let ack = reservation_service::set_status(state.store.as_ref(), &id, &body.status).await?;
    Ok(HttpResponse::Ok().json(ack))
}
