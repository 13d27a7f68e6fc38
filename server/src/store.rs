use std::env;

use datastore_service_cli::client::{DatastoreClient, DatastoreError};
use url::Url;

pub fn init_store() -> Result<DatastoreClient, DatastoreError> {
    let base_url = env::var("DATASTORE_URL").expect("DATASTORE_URL must be set");
    let service_key =
        env::var("DATASTORE_SERVICE_KEY").expect("DATASTORE_SERVICE_KEY must be set");
    let base_url = Url::parse(&base_url).expect("DATASTORE_URL must be a valid URL");
    DatastoreClient::new(base_url, service_key)
}
