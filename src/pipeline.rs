use std::collections::HashSet;

use log::{info, warn};

use crate::datasets::DatasetResolver;
use crate::output::EnrichedPoint;
use crate::samples::SourcePoint;
use crate::territory::TerritoryClassifier;

/// Distinct dataset codes in first-appearance order. Metadata is
/// resolved per code, so the number of search requests is bounded by
/// this list, not by the number of points.
pub fn distinct_dataset_codes(points: &[SourcePoint]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut codes = Vec::new();

    for point in points {
        if seen.insert(point.dataset_code.clone()) {
            codes.push(point.dataset_code.clone());
        }
    }

    codes
}

/// Resolve all codes up front, one throttled request per distinct
/// code. Every outcome (including failures) ends up in the resolver's
/// cache, so the per-point lookups below never touch the network.
pub fn resolve_all_datasets(resolver: &mut DatasetResolver, codes: &[String]) {
    for code in codes {
        let metadata = resolver.resolve(code);
        info!("Dataset {}: `{}`", code, metadata.title);
    }
}

/// Classify and assemble every point. Points keep their input order;
/// a point that cannot be assembled is skipped with a warning.
pub fn enrich_points(
    points: &[SourcePoint],
    classifier: &TerritoryClassifier,
    resolver: &mut DatasetResolver,
    landing_page_url: &str,
) -> Vec<EnrichedPoint> {
    let mut enriched = Vec::with_capacity(points.len());

    for point in points {
        let territory = classifier.classify(point.longitude, point.latitude);
        let metadata = resolver.resolve(&point.dataset_code).clone();

        match EnrichedPoint::from_parts(point, territory, &metadata, landing_page_url) {
            Ok(point) => enriched.push(point),
            Err(e) => warn!("Unable to enrich point {}: {}", point.id, e),
        }
    }

    enriched
}

#[cfg(test)]
mod tests {
    use crate::datasets::NoDelay;
    use crate::samples::read_source_points;
    use crate::territory::BoundaryLayer;
    use crate::test_utils::{self, MockWebserver};

    use super::*;

    fn sample_point(id: &str, code: &str) -> SourcePoint {
        SourcePoint {
            id: id.to_string(),
            longitude: 0.0,
            latitude: 0.0,
            depth: None,
            log_clay_sand: None,
            log_silt_sand: None,
            dataset_code: code.to_string(),
        }
    }

    #[test]
    fn distinct_codes_keep_first_appearance_order() {
        let points = [
            sample_point("B001-01", "b001"),
            sample_point("A001-01", "a001"),
            sample_point("B001-02", "b001"),
            sample_point("C001-01", "c001"),
        ];

        assert_eq!(distinct_dataset_codes(&points), ["b001", "a001", "c001"]);
    }

    #[test]
    fn shared_codes_resolve_to_identical_metadata_with_one_request() {
        let webserver = MockWebserver::from_json_with_expect(
            "/?q=s001&type=dataset&per_page=1",
            "GET",
            r#"{ "data": { "items": [ { "title": "Shared", "global_id": "doi:10.1000/s001" } ] } }"#,
            1,
        );

        let points = [
            sample_point("S001-01", "s001"),
            sample_point("S001-02", "s001"),
        ];
        let mut resolver = DatasetResolver::new(&mockito::server_url(), Box::new(NoDelay));
        let classifier = TerritoryClassifier::from_layers(None, None, None);

        resolve_all_datasets(&mut resolver, &distinct_dataset_codes(&points));
        let enriched = enrich_points(
            &points,
            &classifier,
            &mut resolver,
            "https://example.org/dataset",
        );

        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].dataset_title, enriched[1].dataset_title);
        assert_eq!(enriched[0].doi, enriched[1].doi);
        assert_eq!(enriched[0].url, enriched[1].url);

        webserver.assert();
    }

    #[test]
    fn enriches_a_sample_file_end_to_end() {
        let csv_path = test_utils::create_temp_file(
            "id,longitude,latitude,depth,log_clay_sand,log_silt_sand\n\
             P001-01,-47.9,-15.8,10,0.5,0.3\n",
        );
        let biome_path = test_utils::create_temp_file(&test_utils::boundary_collection_json(&[(
            "Cerrado",
            (-50.0, -20.0, -45.0, -10.0),
        )]));
        let _webserver = MockWebserver::from_json(
            "/?q=p001&type=dataset&per_page=1",
            "GET",
            r#"{ "data": { "items": [ { "title": "Cerrado soils", "global_id": "doi:10.1000/p001" } ] } }"#,
        );

        let points = read_source_points(&csv_path).expect("Unable to read samples.");
        let biomes = BoundaryLayer::from_path(&biome_path, "name").expect("Unable to load layer.");
        let classifier = TerritoryClassifier::from_layers(None, Some(biomes), None);
        let mut resolver = DatasetResolver::new(&mockito::server_url(), Box::new(NoDelay));

        resolve_all_datasets(&mut resolver, &distinct_dataset_codes(&points));
        let enriched = enrich_points(
            &points,
            &classifier,
            &mut resolver,
            "https://example.org/dataset",
        );

        assert_eq!(enriched.len(), 1);

        let json = serde_json::to_value(&enriched[0]).expect("Unable to serialize point.");
        assert_eq!(json["id"], "P001-01");
        assert_eq!(json["lon"], -47.9);
        assert_eq!(json["lat"], -15.8);
        assert_eq!(json["d"], 10.0);
        assert_eq!(json["dc"], "p001");
        assert_eq!(json["bi"], "Cerrado");
        assert_eq!(json["st"], serde_json::Value::Null);
        assert_eq!(json["mu"], serde_json::Value::Null);
        assert_eq!(json["ds"], "Cerrado soils");
        assert_eq!(json["doi"], "doi:10.1000/p001");
        assert_eq!(json["url"], "https://example.org/dataset/p001");
    }
}
