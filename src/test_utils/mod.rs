mod webserver;

use std::io::Write;

use tempfile::TempPath;

pub use self::webserver::MockWebserver;

pub fn create_temp_file(content: &str) -> TempPath {
    create_temp_file_with_suffix("", content)
}

pub fn create_temp_file_with_suffix(suffix: &str, content: &str) -> TempPath {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Unable to create test file.");

    write!(file, "{}", content).expect("Unable to write content to test file.");

    file.into_temp_path()
}

/// Build a GeoJSON `FeatureCollection` of named axis-aligned
/// rectangles, each given as `(min_lon, min_lat, max_lon, max_lat)`.
pub fn boundary_collection_json(rectangles: &[(&str, (f64, f64, f64, f64))]) -> String {
    let features = rectangles
        .iter()
        .map(|(name, (min_lon, min_lat, max_lon, max_lat))| {
            serde_json::json!({
                "type": "Feature",
                "properties": { "name": name },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [min_lon, min_lat],
                        [max_lon, min_lat],
                        [max_lon, max_lat],
                        [min_lon, max_lat],
                        [min_lon, min_lat]
                    ]]
                }
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
    .to_string()
}
