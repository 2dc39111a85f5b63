//! Lists the stations the metadata service reports for a set of states.

use anyhow::Result;

use crate::{cli::StationsArgs, download::ServiceConfig, stations::from_networks};

/// Prints one station identifier per line, in enumeration order.
pub async fn stations(args: &StationsArgs, config: &ServiceConfig) -> Result<usize> {
    let stations = from_networks(&config.network_url, &args.states).await?;

    for station in &stations {
        println!("{}", station);
    }

    Ok(stations.len())
}

// -- Tests -------------------------------------------------------------------
