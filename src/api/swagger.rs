use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diagnostic Center API",
        version = "1.0.0",
        description = "Users, diagnostic tests, doctors, reservations and banners for the diagnostic center.\n\n**Authentication:** obtain a token from `POST /jwt` and send it as `Authorization: Bearer <token>`. Administrative routes additionally require the caller's user record to carry `role: admin`.\n\nTests, doctors and banners share one CRUD surface, documented under `/{collection}`: reads are open, writes are admin. Reservations reuse its list, create and delete handlers."
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health_check,
        crate::api::auth::issue_token,
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::get_user_by_email,
        crate::api::users::make_admin,
        crate::api::users::update_user_status,
        crate::api::users::delete_user,
        crate::api::reservations::list_for_owner,
        crate::api::reservations::update_status,
        crate::api::records::list,
        crate::api::records::get,
        crate::api::records::create,
        crate::api::records::update,
        crate::api::records::delete,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::auth_service::TokenResponse,
            crate::models::StatusUpdate,
            crate::models::MessageResponse,
            crate::database::InsertAck,
            crate::database::UpdateAck,
            crate::database::DeleteAck,
        )
    ),
    tags(
        (name = "Health", description = "Liveness banner and database health."),
        (name = "Auth", description = "Token issuance."),
        (name = "Users", description = "User registration, lookup, roles and status."),
        (name = "Reservations", description = "Test reservations by owner email."),
        (name = "Records", description = "Shared CRUD for tests, doctors, banners and reservations."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt"))
                        .build(),
                ),
            );
        }
    }
}
