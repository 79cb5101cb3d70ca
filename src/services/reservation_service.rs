use mongodb::bson::{doc, Document};

use crate::database::{DocumentStore, UpdateAck};
use crate::models::{RecordKind, Reservations};
use crate::services::record_service;
use crate::utils::AppError;

/// All reservations owned by `email`. Unknown owners get an empty list.
pub async fn for_owner(store: &dyn DocumentStore, email: &str) -> Result<Vec<Document>, AppError> {
    Ok(store
        .find(Reservations::COLLECTION, doc! { "email": email })
        .await?)
}

/// Reservation status is independent of the owning user's status.
pub async fn set_status(
    store: &dyn DocumentStore,
    id: &str,
    status: &str,
) -> Result<UpdateAck, AppError> {
    record_service::set_fields::<Reservations>(store, id, doc! { "status": status }).await
}
