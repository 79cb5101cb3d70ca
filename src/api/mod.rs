pub mod auth;
pub mod health;
pub mod records;
pub mod reservations;
pub mod swagger;
pub mod users;

use actix_web::{
    error::InternalError, guard, http::Method, web, FromRequest, Handler, HttpResponse, Responder,
};

use crate::middleware::{Gate, GateTier};
use crate::models::{Banners, Doctors, MessageResponse, Reservations, Tests};

/// Registers one method+path with its gate tier.
///
/// The method guard sits on the resource so a path can appear once per method
/// with a different tier (e.g. `GET /users` is admin-only, `POST /users` is open).
fn endpoint<F, Args>(
    cfg: &mut web::ServiceConfig,
    method: Method,
    path: &str,
    tier: GateTier,
    handler: F,
) where
    F: Handler<Args>,
    Args: FromRequest + 'static,
    F::Output: Responder + 'static,
{
    cfg.service(
        web::resource(path)
            .guard(guard::Method(method.clone()))
            .wrap(Gate::new(tier))
            .route(web::method(method).to(handler)),
    );
}

/// The route table. Order matters only where patterns overlap: literal
/// segments (`/users/admin/..`, `/users/email/..`) are registered first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use GateTier::{Admin, Authenticated, Open};

    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = MessageResponse::new(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(message)).into()
    }));

    endpoint(cfg, Method::GET, "/", Open, health::index);
    endpoint(cfg, Method::GET, "/health", Open, health::health_check);
    endpoint(cfg, Method::POST, "/jwt", Open, auth::issue_token);

    // Users
    endpoint(cfg, Method::GET, "/users", Admin, users::list_users);
    endpoint(cfg, Method::POST, "/users", Open, users::create_user);
    endpoint(cfg, Method::GET, "/users/email/{email}", Authenticated, users::get_user_by_email);
    endpoint(cfg, Method::PATCH, "/users/admin/{id}", Admin, users::make_admin);
    endpoint(cfg, Method::PATCH, "/users/{id}/status", Admin, users::update_user_status);
    endpoint(cfg, Method::DELETE, "/users/{id}", Admin, users::delete_user);

    // Tests
    endpoint(cfg, Method::GET, "/tests", Open, records::list::<Tests>);
    endpoint(cfg, Method::POST, "/tests", Admin, records::create::<Tests>);
    endpoint(cfg, Method::GET, "/tests/{id}", Open, records::get::<Tests>);
    endpoint(cfg, Method::PATCH, "/tests/{id}", Admin, records::update::<Tests>);
    endpoint(cfg, Method::DELETE, "/tests/{id}", Admin, records::delete::<Tests>);

    // Doctors
    endpoint(cfg, Method::GET, "/doctors", Open, records::list::<Doctors>);
    endpoint(cfg, Method::POST, "/doctors", Admin, records::create::<Doctors>);
    endpoint(cfg, Method::GET, "/doctors/{id}", Open, records::get::<Doctors>);
    endpoint(cfg, Method::PATCH, "/doctors/{id}", Admin, records::update::<Doctors>);
    endpoint(cfg, Method::DELETE, "/doctors/{id}", Admin, records::delete::<Doctors>);

    // Reservations
    endpoint(cfg, Method::GET, "/reservations", Admin, records::list::<Reservations>);
    endpoint(cfg, Method::POST, "/reservations", Authenticated, records::create::<Reservations>);
    endpoint(cfg, Method::GET, "/reservations/{email}", Authenticated, reservations::list_for_owner);
    endpoint(cfg, Method::PATCH, "/reservations/{id}", Admin, reservations::update_status);
    endpoint(cfg, Method::DELETE, "/reservations/{id}", Admin, records::delete::<Reservations>);

    // Banners
    endpoint(cfg, Method::GET, "/banners", Open, records::list::<Banners>);
    endpoint(cfg, Method::POST, "/banners", Admin, records::create::<Banners>);
    endpoint(cfg, Method::GET, "/banners/{id}", Open, records::get::<Banners>);
    endpoint(cfg, Method::PATCH, "/banners/{id}", Admin, records::update::<Banners>);
    endpoint(cfg, Method::DELETE, "/banners/{id}", Admin, records::delete::<Banners>);
}
