use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::database::{DeleteAck, InsertAck, UpdateAck};
use crate::models::{MessageResponse, StatusUpdate, Users, USER_EXISTS_MESSAGE};
use crate::services::{record_service, user_service, user_service::CreateUserOutcome};
use crate::state::AppState;
use crate::utils::{document_to_json, AppError};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user record"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");

    let users = record_service::list::<Users>(state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(users.into_iter().map(document_to_json).collect::<Vec<_>>()))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    description = "Registers a user keyed by `email`. Repeating an email is answered with a 200 message instead of a second record.",
    responses(
        (status = 200, description = "Inserted, or `{\"message\": \"User already exists\"}`", body = InsertAck),
        (status = 400, description = "Body is not an object or has no email", body = MessageResponse)
    )
)]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users");

    match user_service::create_user(state.store.as_ref(), payload.into_inner()).await? {
        CreateUserOutcome::Created(ack) => Ok(HttpResponse::Ok().json(ack)),
        CreateUserOutcome::AlreadyExists => {
            Ok(HttpResponse::Ok().json(MessageResponse::new(USER_EXISTS_MESSAGE)))
        }
    }
}

#[utoipa::path(
    get,
    path = "/users/email/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "The user record"),
        (status = 404, description = "No user with that email", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_by_email(
    state: web::Data<AppState>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /users/email/{}", email);

    let user = user_service::find_by_email(state.store.as_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(document_to_json(user)))
}

#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "Role set to admin", body = UpdateAck),
        (status = 404, description = "No such user", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn make_admin(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("⬆️  PATCH /users/admin/{}", id);

    let ack = user_service::promote_to_admin(state.store.as_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    patch,
    path = "/users/{id}/status",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = UpdateAck),
        (status = 404, description = "No such user", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user_status(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /users/{}/status - {}", id, body.status);

    let ack = user_service::set_status(state.store.as_ref(), &id, &body.status).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "Acknowledged, whether or not the user existed", body = DeleteAck)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /users/{}", id);

    let ack = user_service::delete_user(state.store.as_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
