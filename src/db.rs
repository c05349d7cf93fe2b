use anyhow::Context;
use mongodb::{Client, Database};
use tracing::info;

/// Collections provisioned at startup.
pub const COLLECTIONS: [&str; 2] = ["pins", "users"];

/// Connect to the document store and make sure the named collections exist.
/// The handle is returned for a deployment that wants to keep it; the
/// request flows run entirely off the in-memory store and never touch it.
pub async fn bootstrap(uri: &str, db_name: &str) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .context("connect to document store")?;
    let database = client.database(db_name);

    let existing = database
        .list_collection_names()
        .await
        .context("list collections")?;

    for name in COLLECTIONS {
        if existing.iter().any(|c| c == name) {
            info!(collection = name, "collection fetched");
        } else {
            database
                .create_collection(name)
                .await
                .with_context(|| format!("create collection {name}"))?;
            info!(collection = name, "collection created");
        }
    }

    info!("document store initialized");
    Ok(database)
}
