//! Geometry loading.
//!
//! [`DataLoader`] fetches and decodes one [`GeometryCollection`] per
//! logical layer. Fetching goes through the [`GeometryFetcher`] trait so
//! tests can substitute scripted fetchers for the HTTP and file backends.
//!
//! ```ignore
//! use cartolayer::loader::{DataLoader, SourceFetcher};
//!
//! let fetcher = SourceFetcher::from_base("https://data.example.org/admin", 30)?;
//! let loader = DataLoader::new(fetcher, catalog);
//! let communes = loader.load(LogicalLayer::Communes).await?;
//! ```

mod data_loader;
mod fetch;
mod types;

pub use data_loader::DataLoader;
pub use fetch::{FetchError, FileFetcher, GeometryFetcher, HttpFetcher, SourceFetcher};
pub use types::{Feature, Geometry, GeometryCollection, LoadError, Position};

#[cfg(test)]
pub(crate) use fetch::tests::ScriptedFetcher;
