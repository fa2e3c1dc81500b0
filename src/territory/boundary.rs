use std::fs;
use std::path::Path;

use failure::Error;
use geo::{Contains, MultiPolygon, Point, Polygon};
use geojson::{FeatureCollection, GeoJson, Value};
use log::warn;

/// One named polygon within a boundary layer.
#[derive(Debug)]
struct BoundaryFeature {
    name: String,
    geometry: MultiPolygon<f64>,
}

/// A named collection of polygons representing one territorial
/// partition (states, biomes or municipalities), in file order.
#[derive(Debug)]
pub struct BoundaryLayer {
    features: Vec<BoundaryFeature>,
}

impl BoundaryLayer {
    /// Load a layer from a GeoJSON `FeatureCollection` file.
    /// The boundary name is read from the `name_field` property of each
    /// feature. Features without a usable geometry or name are skipped.
    pub fn from_path(path: &Path, name_field: &str) -> Result<Self, Error> {
        let geojson = fs::read_to_string(path)?.parse::<GeoJson>()?;
        let collection = FeatureCollection::try_from(geojson)?;

        let mut features = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            let name = match feature
                .properties
                .as_ref()
                .and_then(|properties| properties.get(name_field))
                .and_then(|value| value.as_str())
            {
                Some(name) => name.to_string(),
                None => {
                    warn!(
                        "Skipping boundary feature without property `{}` in {}",
                        name_field,
                        path.display()
                    );
                    continue;
                }
            };

            match feature.geometry.and_then(to_multi_polygon) {
                Some(geometry) => features.push(BoundaryFeature { name, geometry }),
                None => warn!(
                    "Skipping boundary feature `{}` without polygon geometry in {}",
                    name,
                    path.display()
                ),
            }
        }

        Ok(Self { features })
    }

    /// Return the name of the first feature (in file order) whose
    /// polygon contains the given coordinate, or `None` when the point
    /// lies outside all boundaries.
    ///
    /// Overlapping polygons are resolved by first match; the layer is
    /// scanned linearly, which is fine for a one-shot batch run.
    pub fn classify(&self, longitude: f64, latitude: f64) -> Option<&str> {
        let point = Point::new(longitude, latitude);
        self.features
            .iter()
            .find(|feature| feature.geometry.contains(&point))
            .map(|feature| feature.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }
}

fn to_multi_polygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    match geometry.value {
        Value::Polygon(_) => Polygon::<f64>::try_from(geometry.value)
            .ok()
            .map(MultiPolygon::from),
        Value::MultiPolygon(_) => MultiPolygon::<f64>::try_from(geometry.value).ok(),
        _ => None,
    }
}
