//! End-to-end download of per-station observation files.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::{
    cli::{create_progress_bar, create_spinner, FetchArgs},
    download::{Downloader, ServiceConfig},
    request::{parse_date, service_url, station_url, DateRange},
    stations,
};

use super::make_output_file_name;

/// Downloads observations for every station in the resolved window and
/// writes one file per station into `args.out_dir`.
pub async fn fetch(args: &FetchArgs, config: &ServiceConfig) -> Result<usize> {
    let range = resolve_range(args)?;
    let service = service_url(&config.data_url, &range);

    let spinner = create_spinner("Fetching station list...".to_string());
    let stations = match &args.stations_file {
        Some(path) => stations::from_file(path)?,
        None => stations::from_networks(&config.network_url, &args.states).await?,
    };
    spinner.finish_with_message(format!("{} stations to download", stations.len()));

    let downloader = Downloader::new(config)?;
    let bar = create_progress_bar(stations.len() as u64, "Downloading...".to_string());

    for station in &stations {
        bar.println(format!("Downloading: {}", station));

        let uri = station_url(&service, station);
        let download = downloader.fetch(&uri).await;

        let path = args.out_dir.join(make_output_file_name(station, &range));
        fs::write(&path, download.into_text())
            .with_context(|| format!("could not write `{}`", path.display()))?;

        bar.inc(1);
    }
    bar.finish_with_message("Stations downloaded");

    Ok(stations.len())
}

/// Resolves the observation window from the command line, prompting for
/// whatever is missing. A blank end date means a single-instant window.
fn resolve_range(args: &FetchArgs) -> Result<DateRange> {
    let start = match &args.start {
        Some(tokens) => parse_date(tokens)?,
        None => parse_date(&prompt("start date, as year month day [hour]: ")?)?,
    };

    let end = match &args.end {
        Some(tokens) => Some(parse_date(tokens)?),
        None if args.start.is_some() => None,
        None => {
            let answer = prompt("end date, blank for same as start: ")?;
            if answer.trim().is_empty() {
                None
            } else {
                Some(parse_date(&answer)?)
            }
        }
    };

    Ok(DateRange::new(start, end))
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(answer)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::net::SocketAddr;
    use std::path::Path;
    use std::time::Duration;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;
    use crate::download::stub;

    #[test]
    fn should_default_end_to_start_without_prompting() {
        let args = args_fixture(Some("2021 7 11 12"), None, Path::new("data"));

        let range = resolve_range(&args).unwrap();

        assert_eq!(range.start, range.end);
    }

    #[test]
    fn should_resolve_explicit_range() {
        let args = args_fixture(Some("2021 7 11 12"), Some("2021 7 12"), Path::new("data"));

        let range = resolve_range(&args).unwrap();

        assert!(range.start < range.end);
    }

    #[test]
    fn should_fail_on_malformed_start_date() {
        let args = args_fixture(Some("yesterday"), None, Path::new("data"));

        assert!(resolve_range(&args).is_err());
    }

    #[tokio::test]
    async fn should_write_one_file_per_station() {
        let out_dir = TempDir::new().unwrap();
        let den = "station,valid,tmpf\nDEN,2021-07-11 12:00,88.0\n";
        let ase = "station,valid,tmpf\nASE,2021-07-11 12:00,71.0\n";
        let (addr, handle) = stub::serve(vec![den.to_string(), ase.to_string()]).await;

        let list = station_list(&["DEN", "ASE"]);
        let mut args = args_fixture(Some("2021 7 11 12"), None, out_dir.path());
        args.stations_file = Some(list.path().to_path_buf());

        let written = fetch(&args, &config_fixture(addr)).await.unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(out_dir.path().join("DEN_202107111200_202107111200.txt")).unwrap(),
            den
        );
        assert_eq!(
            fs::read_to_string(out_dir.path().join("ASE_202107111200_202107111200.txt")).unwrap(),
            ase
        );
        assert_eq!(handle.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn should_write_empty_file_when_download_is_exhausted() {
        let out_dir = TempDir::new().unwrap();
        let (addr, handle) = stub::serve(vec!["ERROR: no data found".to_string(); 6]).await;

        let list = station_list(&["DEN"]);
        let mut args = args_fixture(Some("2021 7 11 12"), None, out_dir.path());
        args.stations_file = Some(list.path().to_path_buf());

        let written = fetch(&args, &config_fixture(addr)).await.unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            fs::read_to_string(out_dir.path().join("DEN_202107111200_202107111200.txt")).unwrap(),
            ""
        );
        assert_eq!(handle.await.unwrap(), 6);
    }

    #[tokio::test]
    async fn should_overwrite_files_on_a_second_run() {
        let out_dir = TempDir::new().unwrap();
        let body = "station,valid,tmpf\nDEN,2021-07-11 12:00,88.0\n";
        let list = station_list(&["DEN"]);

        for _ in 0..2 {
            let (addr, handle) = stub::serve(vec![body.to_string()]).await;
            let mut args = args_fixture(Some("2021 7 11 12"), None, out_dir.path());
            args.stations_file = Some(list.path().to_path_buf());

            fetch(&args, &config_fixture(addr)).await.unwrap();
            handle.await.unwrap();
        }

        let entries = fs::read_dir(out_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
        assert_eq!(
            fs::read_to_string(out_dir.path().join("DEN_202107111200_202107111200.txt")).unwrap(),
            body
        );
    }

    #[tokio::test]
    async fn should_fail_when_output_directory_is_missing() {
        let out_dir = TempDir::new().unwrap();
        let missing = out_dir.path().join("missing");
        let (addr, _handle) = stub::serve(vec!["data".to_string()]).await;

        let list = station_list(&["DEN"]);
        let mut args = args_fixture(Some("2021 7 11 12"), None, &missing);
        args.stations_file = Some(list.path().to_path_buf());

        assert!(fetch(&args, &config_fixture(addr)).await.is_err());
    }

    #[tokio::test]
    async fn should_complete_with_no_stations() {
        let out_dir = TempDir::new().unwrap();
        let list = NamedTempFile::new().unwrap();

        let mut args = args_fixture(Some("2021 7 11 12"), None, out_dir.path());
        args.stations_file = Some(list.path().to_path_buf());

        let addr = "127.0.0.1:1".parse().unwrap();
        let written = fetch(&args, &config_fixture(addr)).await.unwrap();

        assert_eq!(written, 0);
        assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
    }

    fn args_fixture(start: Option<&str>, end: Option<&str>, out_dir: &Path) -> FetchArgs {
        FetchArgs {
            states: "CO".to_string(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            stations_file: None,
            out_dir: out_dir.to_path_buf(),
        }
    }

    fn station_list(stations: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", stations.join("\n")).unwrap();

        file
    }

    fn config_fixture(addr: SocketAddr) -> ServiceConfig {
        ServiceConfig {
            data_url: format!("http://{}/asos.py?", addr),
            retry_delay: Duration::from_millis(1),
            ..ServiceConfig::default()
        }
    }
}
