use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use failure::Error;
use serde::Serialize;

use crate::datasets::DatasetMetadata;
use crate::output::export;
use crate::samples::SourcePoint;
use crate::territory::Territory;

pub const SCHEMA_VERSION: u32 = 1;

/// A source point with territory, dataset metadata and export links
/// attached. Field names are compacted to keep the artifact small;
/// the portal reads these keys as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedPoint {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(rename = "d")]
    pub depth: Option<f64>,
    #[serde(rename = "lcs")]
    pub log_clay_sand: Option<f64>,
    #[serde(rename = "lss")]
    pub log_silt_sand: Option<f64>,
    #[serde(rename = "dc")]
    pub dataset_code: String,
    #[serde(rename = "st")]
    pub state: Option<String>,
    #[serde(rename = "mu")]
    pub municipality: Option<String>,
    #[serde(rename = "bi")]
    pub biome: Option<String>,
    #[serde(rename = "ds")]
    pub dataset_title: String,
    pub doi: Option<String>,
    pub url: String,
    pub csv: String,
}

impl EnrichedPoint {
    /// Assemble the enriched record. The dataset-derived fields come
    /// straight from the resolver's cache entry, so every point of a
    /// dataset carries identical title, DOI and URL.
    pub fn from_parts(
        point: &SourcePoint,
        territory: Territory,
        metadata: &DatasetMetadata,
        landing_page_url: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            id: point.id.clone(),
            lon: point.longitude,
            lat: point.latitude,
            depth: point.depth,
            log_clay_sand: point.log_clay_sand,
            log_silt_sand: point.log_silt_sand,
            dataset_code: point.dataset_code.clone(),
            state: territory.state,
            municipality: territory.municipality,
            biome: territory.biome,
            dataset_title: metadata.title.clone(),
            doi: metadata.doi.clone(),
            url: export::dataset_url(landing_page_url, &point.dataset_code),
            csv: export::single_point_data_uri(point)?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMetadata {
    pub generated_at: String,
    pub source_file: String,
    pub total_points: usize,
    pub unique_datasets: usize,
    pub version: u32,
}

/// The complete artifact: a metadata header plus all enriched points,
/// serialized minified and consumed by the portal as static data.
#[derive(Debug, Serialize)]
pub struct OutputDocument {
    pub metadata: OutputMetadata,
    pub points: Vec<EnrichedPoint>,
}

impl OutputDocument {
    pub fn new(source_file: &str, unique_datasets: usize, points: Vec<EnrichedPoint>) -> Self {
        Self {
            metadata: OutputMetadata {
                generated_at: Utc::now().to_rfc3339(),
                source_file: source_file.to_string(),
                total_points: points.len(),
                unique_datasets,
                version: SCHEMA_VERSION,
            },
            points,
        }
    }

    pub fn write_to_path(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
