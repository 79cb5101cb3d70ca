//! Authorization gate: an actix middleware that runs the stages of a route's
//! [`GateTier`] in order before the handler sees the request.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::services::auth_service::Claims;
use crate::services::user_service;
use crate::state::AppState;
use crate::utils::AppError;

/// Authorization level a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTier {
    Open,
    Authenticated,
    Admin,
}

/// One check in the chain. A stage either lets the request through (possibly
/// enriching it) or ends it with an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Valid `Bearer` token; decoded [`Claims`] go into request extensions.
    Authenticate,
    /// Claims' email belongs to a user whose role is `admin`. Needs `Authenticate` first.
    RequireAdmin,
}

impl GateTier {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            GateTier::Open => &[],
            GateTier::Authenticated => &[Stage::Authenticate],
            GateTier::Admin => &[Stage::Authenticate, Stage::RequireAdmin],
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn app_state(req: &ServiceRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>().cloned().ok_or_else(|| {
        log::error!("❌ AppState missing from app data");
        AppError::Internal("application state not configured".into())
    })
}

impl Stage {
    async fn run(self, req: &ServiceRequest) -> Result<(), AppError> {
        let state = app_state(req)?;

        match self {
            Stage::Authenticate => {
                let token = bearer_token(req).ok_or_else(|| {
                    log::warn!("🚫 {} {} - missing bearer token", req.method(), req.path());
                    AppError::Unauthenticated
                })?;

                let claims = state.tokens.verify(token).map_err(|e| {
                    log::warn!("🚫 {} {} - {}", req.method(), req.path(), e);
                    AppError::from(e)
                })?;

                req.extensions_mut().insert(claims);
                Ok(())
            }
            Stage::RequireAdmin => {
                let email = req
                    .extensions()
                    .get::<Claims>()
                    .map(|claims| claims.email.clone())
                    .ok_or(AppError::Unauthenticated)?;

                if user_service::has_admin_role(state.store.as_ref(), &email).await? {
                    Ok(())
                } else {
                    log::warn!("⛔ {} {} - {} is not an admin", req.method(), req.path(), email);
                    Err(AppError::Forbidden)
                }
            }
        }
    }
}

pub struct Gate {
    tier: GateTier,
}

impl Gate {
    pub fn new(tier: GateTier) -> Self {
        Self { tier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Gate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = GateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GateService {
            service: Rc::new(service),
            stages: self.tier.stages(),
        }))
    }
}

pub struct GateService<S> {
    service: Rc<S>,
    stages: &'static [Stage],
}

impl<S, B> Service<ServiceRequest> for GateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let stages = self.stages;

        Box::pin(async move {
            for stage in stages {
                if let Err(err) = stage.run(&req).await {
                    return Ok(req.into_response(err.error_response()).map_into_right_body());
                }
            }
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DocumentStore, MemoryStore};
    use crate::services::auth_service::TokenService;
    use actix_web::{http::StatusCode, test as actix_test, App, HttpResponse};
    use mongodb::bson::doc;
    use std::sync::Arc;

    const SECRET: &str = "gate-secret";

    async fn whoami(claims: web::ReqData<Claims>) -> HttpResponse {
        HttpResponse::Ok().body(claims.email.clone())
    }

    async fn state_with_admin() -> web::Data<AppState> {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc! { "email": "boss@x.com", "role": "admin" })
            .await
            .unwrap();
        store
            .insert_one("users", doc! { "email": "pat@x.com", "role": "user" })
            .await
            .unwrap();
        web::Data::new(AppState::new(Arc::new(store), TokenService::new(SECRET)))
    }

    fn bearer(email: &str) -> (&'static str, String) {
        let token = TokenService::new(SECRET).issue(&Claims::for_email(email)).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    #[test]
    fn tiers_list_their_stages_in_order() {
        assert!(GateTier::Open.stages().is_empty());
        assert_eq!(GateTier::Authenticated.stages(), &[Stage::Authenticate]);
        assert_eq!(GateTier::Admin.stages(), &[Stage::Authenticate, Stage::RequireAdmin]);
    }

    #[actix_web::test]
    async fn authenticated_tier_checks_token() {
        let app = actix_test::init_service(
            App::new().app_data(state_with_admin().await).service(
                web::resource("/me")
                    .wrap(Gate::new(GateTier::Authenticated))
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/me")
                .insert_header(("Authorization", "Bearer garbage"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/me")
                .insert_header(("Authorization", "Token abc"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = actix_test::TestRequest::get().uri("/me").insert_header(bearer("pat@x.com")).to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"pat@x.com");
    }

    #[actix_web::test]
    async fn admin_tier_checks_role() {
        let app = actix_test::init_service(
            App::new().app_data(state_with_admin().await).service(
                web::resource("/admin")
                    .wrap(Gate::new(GateTier::Admin))
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let cases = [
            ("boss@x.com", StatusCode::OK),
            ("pat@x.com", StatusCode::FORBIDDEN),
            ("ghost@x.com", StatusCode::FORBIDDEN),
        ];
        for (email, expected) in cases {
            let req = actix_test::TestRequest::get().uri("/admin").insert_header(bearer(email)).to_request();
            assert_eq!(actix_test::call_service(&app, req).await.status(), expected, "{}", email);
        }

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/admin").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
