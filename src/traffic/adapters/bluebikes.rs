use anyhow::Result;

use crate::{
    feeds::{stations::StationRecord, trips::TripRecord},
    traffic::{Station, StationId, Trip, adapters::TrafficAdapter},
};

/// Adapts the parsed Bluebikes feeds to the traffic model. Stations are keyed
/// by short name, which is what the trip log's station columns carry. Trips
/// referencing stations missing from the directory are kept; their counts are
/// simply never looked up.
pub struct BluebikesAdapter<'a> {
    stations: &'a [StationRecord],
    trips: &'a [TripRecord],
}

impl<'a> BluebikesAdapter<'a> {
    pub fn new(stations: &'a [StationRecord], trips: &'a [TripRecord]) -> Self {
        Self { stations, trips }
    }
}

impl<'a> TrafficAdapter for BluebikesAdapter<'a> {
    type Error = anyhow::Error;

    fn stations(&self) -> Result<Vec<Station>, Self::Error> {
        Ok(self
            .stations
            .iter()
            .map(|s| {
                Station::new(
                    StationId::new(s.short_name.clone()),
                    s.name.clone(),
                    s.lat,
                    s.lon,
                )
            })
            .collect())
    }

    fn trips(&self) -> Result<Vec<Trip>, Self::Error> {
        Ok(self
            .trips
            .iter()
            .map(|t| {
                Trip::new(
                    StationId::new(t.start_station_id.clone()),
                    StationId::new(t.end_station_id.clone()),
                    t.started_at,
                    t.ended_at,
                )
            })
            .collect())
    }
}
