use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::client::DatastoreClient;
use crate::{Collection, OperationResult};

/// Partial-field update of one row, stamping `updated_at` on top of the
/// caller's fields. Transport failures and store-reported failures both come
/// back as a failed `OperationResult`; callers never see a thrown error.
pub async fn update_entity(
    store: &DatastoreClient,
    collection: Collection,
    id: &str,
    fields: Map<String, Value>,
) -> OperationResult {
    info!(collection = collection.as_str(), id, "updating entity");

    let mut body = fields;
    body.insert(
        "updated_at".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );

    match store.update_rows(collection, id, &Value::Object(body)).await {
        Ok(rows) if rows.is_empty() => {
            error!(collection = collection.as_str(), id, "update matched no rows");
            OperationResult::failed(format!("no rows matched id {id} in {collection}"))
        }
        Ok(_) => OperationResult::ok(),
        Err(err) => {
            error!(collection = collection.as_str(), id, error = %err, "update failed");
            OperationResult::failed(err.to_string())
        }
    }
}

/// Deletes one row. A delete that matches nothing is reported as a failure,
/// never as a silent success.
pub async fn delete_entity(
    store: &DatastoreClient,
    collection: Collection,
    id: &str,
) -> OperationResult {
    info!(collection = collection.as_str(), id, "deleting entity");

    match store.delete_rows(collection, id).await {
        Ok(rows) if rows.is_empty() => {
            error!(collection = collection.as_str(), id, "delete matched no rows");
            OperationResult::failed(format!("no rows matched id {id} in {collection}"))
        }
        Ok(_) => OperationResult::ok(),
        Err(err) => {
            error!(collection = collection.as_str(), id, error = %err, "delete failed");
            OperationResult::failed(err.to_string())
        }
    }
}
