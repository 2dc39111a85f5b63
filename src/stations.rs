//! Builds the list of stations to download.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Feature collection returned by the network metadata endpoint. Only the
/// fields consumed here are modelled.
#[derive(Debug, Deserialize)]
struct NetworkGeojson {
    features: Vec<SiteFeature>,
}

#[derive(Debug, Deserialize)]
struct SiteFeature {
    properties: SiteProperties,
}

#[derive(Debug, Deserialize)]
struct SiteProperties {
    sid: String,
}

impl NetworkGeojson {
    fn station_ids(self) -> Vec<String> {
        self.features
            .into_iter()
            .map(|feature| feature.properties.sid)
            .collect()
    }
}

/// Reads station identifiers from a plain list, one per line.
pub fn from_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("could not open station list `{}`", path.display()))?;
    let reader = BufReader::new(file);

    let mut stations = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let station = line.trim();
        if !station.is_empty() {
            stations.push(station.to_string());
        }
    }

    Ok(stations)
}

/// Network codes for a whitespace-separated set of two-letter states.
/// Iowa's AWOS sites form their own network, so it is always included.
pub fn networks_for_states(states: &str) -> Vec<String> {
    let mut networks = vec!["AWOS".to_string()];
    for state in states.split_whitespace() {
        networks.push(format!("{}_ASOS", state));
    }

    networks
}

/// Queries the metadata service for every station in the states' networks.
/// Duplicates are kept and failures are not retried; a failure aborts the run.
pub async fn from_networks(network_url: &str, states: &str) -> Result<Vec<String>> {
    let mut stations = Vec::new();
    for network in networks_for_states(states) {
        let uri = format!("{}/{}.geojson", network_url, network);
        let geojson: NetworkGeojson = reqwest::get(&uri)
            .await?
            .error_for_status()?
            .json()
            .await?;
        stations.extend(geojson.station_ids());
    }

    Ok(stations)
}

// -- Tests -------------------------------------------------------------------
