mod document;
mod export;

pub use self::document::{EnrichedPoint, OutputDocument, OutputMetadata, SCHEMA_VERSION};
pub use self::export::{dataset_url, single_point_data_uri};
