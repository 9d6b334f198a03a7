use std::{net::SocketAddr, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bikeshare_traffic_map::{
    feeds::{fetch::Fetcher, stations::parse_station_feed, trips::parse_trip_log},
    server,
    traffic::{TrafficModel, adapters::bluebikes::BluebikesAdapter},
};

const DEFAULT_STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
const DEFAULT_TRIPS_URL: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

#[derive(Parser)]
#[command(about = "Serves bike-share station traffic snapshots for a map overlay")]
struct Args {
    /// Station information document (URL or local path)
    #[arg(long, default_value = DEFAULT_STATIONS_URL)]
    stations_url: String,

    /// Trip log CSV, optionally zip/gzip packaged (URL or local path)
    #[arg(long, default_value = DEFAULT_TRIPS_URL)]
    trips_url: String,

    /// Address to serve the traffic API on
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let now = Instant::now();
    info!(stations = %args.stations_url, trips = %args.trips_url, "Loading datasets");
    let fetcher = Fetcher::new();
    let (station_bytes, trip_bytes) = tokio::try_join!(
        fetcher.fetch_bytes(&args.stations_url),
        fetcher.fetch_bytes(&args.trips_url),
    )?;

    let stations = parse_station_feed(&station_bytes)?;
    let trips = parse_trip_log(trip_bytes)?;
    info!(
        stations = stations.len(),
        trips = trips.len(),
        elapsed = ?now.elapsed(),
        "Datasets loaded"
    );

    let now = Instant::now();
    let adapter = BluebikesAdapter::new(&stations, &trips);
    let model = TrafficModel::from_adapter(&adapter).context("building traffic model")?;
    info!(
        stations = model.stations().len(),
        trips = model.trip_count(),
        elapsed = ?now.elapsed(),
        "Traffic model built"
    );

    let app = server::router(Arc::new(model));
    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    info!(listen = %args.listen, "Serving traffic API");
    axum::serve(listener, app).await?;

    Ok(())
}
