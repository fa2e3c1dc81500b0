use std::path::Path;
use std::thread;

use log::{info, warn};

use crate::settings::{BoundariesSettings, BoundaryLayerSettings};
use crate::territory::BoundaryLayer;

/// The territorial classification of one coordinate. Each dimension is
/// `None` when the point lies outside all boundaries of that layer or
/// when the layer itself could not be loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Territory {
    pub state: Option<String>,
    pub biome: Option<String>,
    pub municipality: Option<String>,
}

/// Classifies coordinates against the three boundary layers.
#[derive(Debug)]
pub struct TerritoryClassifier {
    states: Option<BoundaryLayer>,
    biomes: Option<BoundaryLayer>,
    municipalities: Option<BoundaryLayer>,
}

impl TerritoryClassifier {
    /// Load the three layers concurrently. A layer that fails to load
    /// yields a warning and `None` for that dimension on every point;
    /// it never aborts the run.
    pub fn load(settings: &BoundariesSettings) -> Self {
        let (states, biomes, municipalities) = thread::scope(|scope| {
            let states = scope.spawn(|| load_layer(&settings.states));
            let biomes = scope.spawn(|| load_layer(&settings.biomes));
            let municipalities = scope.spawn(|| load_layer(&settings.municipalities));

            (
                unpack_layer("states", states.join()),
                unpack_layer("biomes", biomes.join()),
                unpack_layer("municipalities", municipalities.join()),
            )
        });

        Self::from_layers(states, biomes, municipalities)
    }

    pub fn from_layers(
        states: Option<BoundaryLayer>,
        biomes: Option<BoundaryLayer>,
        municipalities: Option<BoundaryLayer>,
    ) -> Self {
        Self {
            states,
            biomes,
            municipalities,
        }
    }

    pub fn classify(&self, longitude: f64, latitude: f64) -> Territory {
        Territory {
            state: layer_name(&self.states, longitude, latitude),
            biome: layer_name(&self.biomes, longitude, latitude),
            municipality: layer_name(&self.municipalities, longitude, latitude),
        }
    }
}

fn load_layer(settings: &BoundaryLayerSettings) -> Result<BoundaryLayer, failure::Error> {
    BoundaryLayer::from_path(Path::new(&settings.file), &settings.name_field)
}

fn unpack_layer(
    layer: &str,
    result: thread::Result<Result<BoundaryLayer, failure::Error>>,
) -> Option<BoundaryLayer> {
    match result {
        Ok(Ok(boundaries)) => {
            info!("Loaded {} {} boundaries.", boundaries.len(), layer);
            Some(boundaries)
        }
        Ok(Err(e)) => {
            warn!("Unable to load {} boundaries: {}", layer, e);
            None
        }
        Err(_) => {
            warn!("Boundary loader for {} panicked.", layer);
            None
        }
    }
}

fn layer_name(layer: &Option<BoundaryLayer>, longitude: f64, latitude: f64) -> Option<String> {
    layer
        .as_ref()
        .and_then(|boundaries| boundaries.classify(longitude, latitude))
        .map(str::to_string)
}
