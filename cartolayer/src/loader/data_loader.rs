//! Per-layer geometry loading.

use super::fetch::GeometryFetcher;
use super::types::{GeometryCollection, LoadError};
use crate::catalog::{LayerCatalog, LogicalLayer};
use std::sync::Arc;
use tracing::debug;

/// Fetches and decodes the geometry collection of a logical layer.
///
/// The loader keeps no per-pass state: the composer issues exactly one
/// `load` per logical layer for every composition pass.
pub struct DataLoader<F> {
    fetcher: F,
    catalog: Arc<LayerCatalog>,
}

impl<F: GeometryFetcher> DataLoader<F> {
    /// Create a loader resolving endpoints through `catalog`.
    pub fn new(fetcher: F, catalog: Arc<LayerCatalog>) -> Self {
        Self { fetcher, catalog }
    }

    /// Location the loader reads for `name`.
    pub fn location_of(&self, name: LogicalLayer) -> String {
        self.fetcher.locate(&self.catalog.entry(name).endpoint)
    }

    /// Fetch and decode the collection for `name`.
    pub async fn load(&self, name: LogicalLayer) -> Result<GeometryCollection, LoadError> {
        let location = self.location_of(name);
        debug!(layer = %name, location = %location, "Loading geometry");

        let bytes = self
            .fetcher
            .fetch(&location)
            .await
            .map_err(|e| LoadError::FetchFailed {
                layer: name,
                location: location.clone(),
                reason: e.to_string(),
            })?;

        let collection = GeometryCollection::decode(name, &bytes)?;
        debug!(
            layer = %name,
            features = collection.len(),
            "Geometry decoded"
        );
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{FetchError, ScriptedFetcher};

    const EMPTY: &str = r#"{"type": "FeatureCollection", "features": []}"#;

    fn loader(fetcher: ScriptedFetcher) -> DataLoader<ScriptedFetcher> {
        DataLoader::new(fetcher, Arc::new(LayerCatalog::default()))
    }

    #[tokio::test]
    async fn test_load_uses_catalog_endpoint() {
        let fetcher = ScriptedFetcher::new().respond("communes.geojson", 0, EMPTY);
        let loader = loader(fetcher.clone());

        let collection = loader.load(LogicalLayer::Communes).await.unwrap();

        assert!(collection.is_empty());
        assert_eq!(fetcher.calls(), vec!["communes.geojson".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_classified() {
        let fetcher = ScriptedFetcher::new().fail(
            "sections.geojson",
            0,
            FetchError::Status {
                status: 503,
                url: "sections.geojson".to_string(),
            },
        );

        let err = loader(fetcher).load(LogicalLayer::Sections).await.unwrap_err();

        match err {
            LoadError::FetchFailed {
                layer,
                location,
                reason,
            } => {
                assert_eq!(layer, LogicalLayer::Sections);
                assert_eq!(location, "sections.geojson");
                assert!(reason.contains("503"));
            }
            other => panic!("expected FetchFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_decode_failure_is_classified() {
        let fetcher = ScriptedFetcher::new().respond("departements.geojson", 0, "not json");

        let err = loader(fetcher)
            .load(LogicalLayer::Departments)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LoadError::DecodeFailed {
                layer: LogicalLayer::Departments,
                ..
            }
        ));
    }
}
