use backoff::{future::retry, ExponentialBackoff};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde_json::Value;
use std::env;
use url::Url;

use datastore_service_cli::client::{DatastoreClient, DatastoreError};
use datastore_service_cli::{operations, utils, Collection};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a single row and print it
    Get {
        /// Collection name (registered_users or admin_user)
        collection: String,
        /// Row id
        id: String,
    },
    /// Update fields of a row
    Update {
        collection: String,
        id: String,
        /// JSON object with the fields to change
        fields: String,
    },
    /// Delete a row
    Delete {
        collection: String,
        id: String,
    },
    /// Export all rows of a collection to a JSON file
    Export {
        collection: String,
        /// Output file
        #[arg(short, long, default_value = "rows.json")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let base_url = env::var("DATASTORE_URL")
        .expect("DATASTORE_URL environment variable not set");
    let service_key = env::var("DATASTORE_SERVICE_KEY")
        .expect("DATASTORE_SERVICE_KEY environment variable not set");

    let store = DatastoreClient::new(Url::parse(&base_url)?, service_key)?;
    let args = Args::parse();

    match args.command {
        Command::Get { collection, id } => {
            let collection: Collection = collection.parse()?;
            match store.fetch_row(collection, &id).await? {
                Some(row) => println!("{}", serde_json::to_string_pretty(&row)?),
                None => {
                    eprintln!("❌ no row with id {} in {}", id, collection);
                    std::process::exit(1);
                }
            }
        }
        Command::Update {
            collection,
            id,
            fields,
        } => {
            let collection: Collection = collection.parse()?;
            let fields: serde_json::Map<String, Value> = serde_json::from_str(&fields)?;
            let result = operations::update_entity(&store, collection, &id, fields).await;
            report(result);
        }
        Command::Delete { collection, id } => {
            let collection: Collection = collection.parse()?;
            let result = operations::delete_entity(&store, collection, &id).await;
            report(result);
        }
        Command::Export { collection, output } => {
            let collection: Collection = collection.parse()?;
            let rows = fetch_all_with_retry(&store, collection).await?;
            println!("{} rows in {}", rows.len(), collection);
            utils::save_json(&Value::Array(rows), &output)?;
        }
    }

    Ok(())
}

fn report(result: datastore_service_cli::OperationResult) {
    if result.success {
        println!("✅ done");
    } else {
        eprintln!(
            "❌ {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
        std::process::exit(1);
    }
}

/// Reads retry on transient transport failures; mutations never do.
async fn fetch_all_with_retry(
    store: &DatastoreClient,
    collection: Collection,
) -> Result<Vec<Value>, DatastoreError> {
    let backoff = ExponentialBackoff::default();
    retry(backoff, || async {
        match store.fetch_rows(collection).await {
            Ok(rows) => Ok(rows),
            Err(DatastoreError::Transport(err)) => {
                eprintln!("❌ fetch failed, retrying: {}", err);
                Err(backoff::Error::transient(DatastoreError::Transport(err)))
            }
            Err(err) => Err(backoff::Error::permanent(err)),
        }
    })
    .await
}
