//! Seed the JSON store with the built-in product catalog.
//!
//! The server falls back to the same seed when no catalog document
//! exists, so this command is only needed to materialize the document
//! for hand-editing.

use tracing::info;

use dabeeha_server::catalog::seed_products;
use dabeeha_server::store::{Store, keys};

/// Write the seed catalog into the store at `data_dir`.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, a catalog document
/// already exists and `force` is not set, or the write fails.
pub async fn run(data_dir: Option<&str>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let data_dir = data_dir
        .map(ToOwned::to_owned)
        .or_else(|| std::env::var("DABEEHA_DATA_DIR").ok())
        .unwrap_or_else(|| "data".to_owned());

    let store = Store::open(&data_dir)?;

    if !force
        && store
            .get::<serde_json::Value>(keys::CATALOG)
            .await?
            .is_some()
    {
        return Err("catalog document already exists (use --force to overwrite)".into());
    }

    let products = seed_products();
    store.put(keys::CATALOG, &products).await?;

    info!(
        count = products.len(),
        data_dir = %data_dir,
        "seed catalog written"
    );
    Ok(())
}
