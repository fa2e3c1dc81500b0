use std::path::Path;

use csv::StringRecord;
use failure::Error;
use log::debug;

/// One soil-sample observation as read from the source CSV.
/// Immutable once parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct SourcePoint {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    pub depth: Option<f64>,
    pub log_clay_sand: Option<f64>,
    pub log_silt_sand: Option<f64>,
    pub dataset_code: String,
}

impl SourcePoint {
    /// Parse a CSV record with the columns
    /// `id, longitude, latitude, depth, log_clay_sand, log_silt_sand`.
    /// Returns `None` when the coordinates are unusable.
    fn from_record(record: &StringRecord) -> Option<Self> {
        let id = record.get(0)?.trim().to_string();
        let longitude = parse_coordinate(record.get(1)?)?;
        let latitude = parse_coordinate(record.get(2)?)?;

        Some(Self {
            dataset_code: dataset_code(&id),
            id,
            longitude,
            latitude,
            depth: parse_optional(record.get(3)),
            log_clay_sand: parse_optional(record.get(4)),
            log_silt_sand: parse_optional(record.get(5)),
        })
    }
}

/// Derive the dataset code from a point identifier: the lowercased
/// prefix before the first hyphen, or the whole identifier when there
/// is no hyphen.
pub fn dataset_code(id: &str) -> String {
    id.split('-').next().unwrap_or(id).trim().to_lowercase()
}

/// Read all source points from a CSV file, skipping the header row.
/// Rows with missing or non-finite coordinates are dropped silently;
/// only failure to read the file itself is an error.
pub fn read_source_points(path: &Path) -> Result<Vec<SourcePoint>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!("Dropping malformed sample row: {}", e);
                continue;
            }
        };

        match SourcePoint::from_record(&record) {
            Some(point) => points.push(point),
            None => debug!("Dropping sample row with unusable coordinates: {:?}", record),
        }
    }

    Ok(points)
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_optional(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
