//! Check command.
//!
//! Loads each layer's geometry the way composition would, without a
//! surface, so data problems can be diagnosed in isolation.

use std::sync::Arc;
use tracing::{info, warn};

use cartolayer::loader::DataLoader;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Fetch and decode every layer in paint order.
pub async fn run(debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("check");

    let catalog = Arc::new(runner.config().data.catalog());
    let loader = DataLoader::new(runner.fetcher()?, Arc::clone(&catalog));

    let mut failed = 0;
    for layer in catalog.order() {
        let location = loader.location_of(layer);
        match loader.load(layer).await {
            Ok(collection) => {
                info!(%layer, %location, features = collection.len(), "Layer loaded");
                println!(
                    "  ok    {:<12} {:>7} features  {}",
                    layer.as_str(),
                    collection.len(),
                    location
                );
            }
            Err(e) => {
                warn!(%layer, error = %e, "Layer failed");
                println!("  FAIL  {:<12} {}", layer.as_str(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::LayersFailed(failed));
    }
    Ok(())
}
