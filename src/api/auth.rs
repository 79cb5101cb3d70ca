use actix_web::{web, HttpResponse};

use crate::services::auth_service::{Claims, TokenResponse};
use crate::state::AppState;
use crate::utils::AppError;

/// Signs the posted claims into a one hour token. Open route: the caller is
/// trusted to have authenticated with the identity provider already.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    description = "Body is a JSON object with at least an `email`; every field is signed into the token.",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing email or reserved claim")
    )
)]
pub async fn issue_token(
    state: web::Data<AppState>,
    claims: web::Json<Claims>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /jwt - email: {}", claims.email);

    let token = state.tokens.issue(&claims)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
