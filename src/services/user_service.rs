use mongodb::bson::{doc, Document};
use serde_json::Value;

use crate::database::{DeleteAck, DocumentStore, InsertAck, UpdateAck};
use crate::models::{is_admin, RecordKind, Users, ROLE_ADMIN, ROLE_USER};
use crate::services::record_service;
use crate::utils::{document_from_json, AppError};

#[derive(Debug)]
pub enum CreateUserOutcome {
    Created(InsertAck),
    AlreadyExists,
}

/// Check-then-insert keyed by email. Not atomic: two concurrent creations
/// with the same email can both pass the check.
///
/// New users always start with the ordinary role; promotion goes through
/// [`promote_to_admin`].
pub async fn create_user(
    store: &dyn DocumentStore,
    payload: Value,
) -> Result<CreateUserOutcome, AppError> {
    let mut user = document_from_json(payload)?;
    let email = user
        .get_str("email")
        .map_err(|_| AppError::BadRequest("email is required".into()))?
        .to_string();

    if store.find_one(Users::COLLECTION, doc! { "email": &email }).await?.is_some() {
        log::info!("ℹ️  User already exists: {}", email);
        return Ok(CreateUserOutcome::AlreadyExists);
    }

    user.insert("role", ROLE_USER);
    let ack = store.insert_one(Users::COLLECTION, user).await?;
    log::info!("✅ User created: {}", email);

    Ok(CreateUserOutcome::Created(ack))
}

pub async fn find_by_email(store: &dyn DocumentStore, email: &str) -> Result<Document, AppError> {
    store
        .find_one(Users::COLLECTION, doc! { "email": email })
        .await?
        .ok_or(AppError::NotFound("User"))
}

/// Fresh read on every call; roles are never cached.
pub async fn has_admin_role(store: &dyn DocumentStore, email: &str) -> Result<bool, AppError> {
    let user = store
        .find_one(Users::COLLECTION, doc! { "email": email })
        .await?;
    Ok(user.as_ref().is_some_and(is_admin))
}

/// Startup bootstrap: every listed email ends up with an admin user record.
/// Existing users are promoted in place, missing ones are created.
pub async fn ensure_admins(store: &dyn DocumentStore, emails: &[String]) -> Result<(), AppError> {
    for email in emails {
        let filter = doc! { "email": email };
        match store.find_one(Users::COLLECTION, filter.clone()).await? {
            Some(user) if is_admin(&user) => {}
            Some(_) => {
                store
                    .update_one(Users::COLLECTION, filter, doc! { "role": ROLE_ADMIN })
                    .await?;
                log::info!("⬆️  Promoted configured admin: {}", email);
            }
            None => {
                store
                    .insert_one(Users::COLLECTION, doc! { "email": email, "role": ROLE_ADMIN })
                    .await?;
                log::info!("✅ Created configured admin: {}", email);
            }
        }
    }
    Ok(())
}

pub async fn promote_to_admin(store: &dyn DocumentStore, id: &str) -> Result<UpdateAck, AppError> {
    record_service::set_fields::<Users>(store, id, doc! { "role": ROLE_ADMIN }).await
}

pub async fn set_status(
    store: &dyn DocumentStore,
    id: &str,
    status: &str,
) -> Result<UpdateAck, AppError> {
    record_service::set_fields::<Users>(store, id, doc! { "status": status }).await
}

pub async fn delete_user(store: &dyn DocumentStore, id: &str) -> Result<DeleteAck, AppError> {
    record_service::delete::<Users>(store, id).await
}
