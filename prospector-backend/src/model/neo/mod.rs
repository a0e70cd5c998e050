///! Near-Earth object catalog access
///!
///! Raw NeoWs record types, the HTTP client, and the projection of a raw
///! record into a [`prospector_common::ResourceSnapshot`].

pub mod api_client;
pub mod extractor;
pub mod types;

pub use api_client::{CatalogSource, NeoWsClient};
pub use extractor::extract_resources;
pub use types::RawCatalogRecord;
