use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use itertools::Itertools;
use serde::Deserialize;

use crate::network::adapters::{NetworkAdapter, Route};

const BUILTIN_NETWORK: &str = include_str!("../../../data/metro.json");

#[derive(Debug, Deserialize)]
struct NetworkDefinition {
    stations: Vec<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

/// Network definition in JSON:
/// `{"stations": ["A", "B"], "routes": [{"from": "A", "to": "B", "distance": 5}]}`
pub struct JsonAdapter {
    definition: NetworkDefinition,
}

impl JsonAdapter {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_NETWORK).context("parsing built-in network")
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let definition = serde_json::from_str(s)?;
        Ok(Self::new(definition))
    }

    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let definition = serde_json::from_reader(BufReader::new(r))?;
        Ok(Self::new(definition))
    }

    /// Reads a definition file, gunzipping it first when it ends in `.gz`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {path:?}"))?;

        let gzipped = path.extension().is_some_and(|ext| ext == "gz");
        let adapter = if gzipped {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(file)
        };

        adapter.with_context(|| format!("parsing network definition {path:?}"))
    }

    fn new(definition: NetworkDefinition) -> Self {
        for name in definition.stations.iter().duplicates() {
            tracing::warn!(station = %name, "station listed more than once");
        }

        Self { definition }
    }
}

impl NetworkAdapter for JsonAdapter {
    type Error = anyhow::Error;

    fn stations(&self) -> Result<Vec<String>> {
        Ok(self.definition.stations.clone())
    }

    fn routes(&self) -> Result<Vec<Route>> {
        Ok(self.definition.routes.clone())
    }
}
