//! Conversion between client JSON payloads and stored BSON documents.

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use super::error::AppError;

/// Turns a request body into a document ready for storage.
///
/// Only JSON objects are accepted. Any client supplied `_id` is dropped so the
/// store always owns identifier generation. Top-level keys must be plain field
/// names: a dotted or `$` key would be read by MongoDB as a path or operator.
pub fn document_from_json(value: Value) -> Result<Document, AppError> {
    let Value::Object(mut fields) = value else {
        return Err(AppError::BadRequest("Request body must be a JSON object".into()));
    };
    fields.remove("_id");

    if let Some(key) = fields.keys().find(|key| key.contains('.') || key.starts_with('$')) {
        return Err(AppError::BadRequest(format!("Invalid field name: {}", key)));
    }

    mongodb::bson::to_document(&fields)
        .map_err(|e| AppError::BadRequest(format!("Unsupported payload: {}", e)))
}

/// Renders a stored document as JSON, with ObjectIds as plain hex strings.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    #[test]
    fn object_ids_render_as_hex() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! { "_id": oid, "name": "CBC", "tags": [ { "ref": oid } ] });

        assert_eq!(rendered["_id"], json!(oid.to_hex()));
        assert_eq!(rendered["name"], json!("CBC"));
        assert_eq!(rendered["tags"][0]["ref"], json!(oid.to_hex()));
    }

    #[test]
    fn client_ids_are_discarded() {
        let doc = document_from_json(json!({ "_id": "abc", "title": "Summer checkup" })).unwrap();

        assert!(doc.get("_id").is_none());
        assert_eq!(doc.get_str("title").unwrap(), "Summer checkup");
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(matches!(document_from_json(json!([1, 2])), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn path_and_operator_keys_are_rejected() {
        assert!(matches!(
            document_from_json(json!({ "address.city": "Dhaka" })),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            document_from_json(json!({ "$set": { "role": "admin" } })),
            Err(AppError::BadRequest(_))
        ));
        assert!(document_from_json(json!({ "address": { "city": "Dhaka" } })).is_ok());
    }

    #[test]
    fn malformed_ids_are_internal_failures() {
        assert!(matches!(parse_object_id("not-an-id"), Err(AppError::InvalidId(_))));
        assert!(parse_object_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    }
}
