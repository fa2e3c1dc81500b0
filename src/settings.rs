use std::path::Path;

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use config::FileFormat;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GeneralSettings {
    pub log_file: String,
    pub debug: bool,
}

#[derive(Debug, Deserialize)]
pub struct SamplesSettings {
    pub file: String,
}

/// Location of one boundary layer file plus the feature property
/// that holds the boundary name.
#[derive(Debug, Deserialize)]
pub struct BoundaryLayerSettings {
    pub file: String,
    pub name_field: String,
}

#[derive(Debug, Deserialize)]
pub struct BoundariesSettings {
    pub states: BoundaryLayerSettings,
    pub biomes: BoundaryLayerSettings,
    pub municipalities: BoundaryLayerSettings,
}

#[derive(Debug, Deserialize)]
pub struct DatasetsSettings {
    pub search_url: String,
    pub landing_page_url: String,
    pub request_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    pub file: String,
}

#[derive(Debug, Deserialize)]
pub struct DebugSettings {
    pub point_start: Option<usize>,
    pub point_limit: Option<usize>,
}

/// This struct stores the program settings.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub general: GeneralSettings,
    pub samples: SamplesSettings,
    pub boundaries: BoundariesSettings,
    pub datasets: DatasetsSettings,
    pub output: OutputSettings,
    pub debug: DebugSettings,
}

impl Settings {
    pub fn new(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut s = ConfigBuilder::<DefaultState>::default();
        s = s.add_source(File::new("settings-default.toml", FileFormat::Toml));
        s = s.add_source(File::new("settings.toml", FileFormat::Toml).required(false));
        if let Some(path) = path {
            s = s.add_source(File::from(path));
        }

        let config = s.build()?;

        config.try_deserialize()
    }
}
