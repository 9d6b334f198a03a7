use std::collections::HashMap;

use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::traffic::{
    MINUTES_PER_DAY, MinuteWindow, StationId, StationSnapshot, TimeFilter,
    adapters::TrafficAdapter, minute_of_day,
};

#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Station {
    pub fn new(id: StationId, name: String, lat: f64, lon: f64) -> Self {
        Self { id, name, lat, lon }
    }
}

#[derive(Clone, Debug)]
pub struct Trip {
    pub start_station: StationId,
    pub end_station: StationId,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl Trip {
    pub fn new(
        start_station: StationId,
        end_station: StationId,
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
    ) -> Self {
        Self {
            start_minute: minute_of_day(started_at),
            end_minute: minute_of_day(ended_at),
            start_station,
            end_station,
            started_at,
            ended_at,
        }
    }
}

/// The station directory, the trip set, and the per-minute bucket arrays.
/// Built once after both feeds load; read-only afterwards.
pub struct TrafficModel {
    stations: Vec<Station>,
    trips: Vec<Trip>,
    departures_by_minute: Vec<Vec<u32>>,
    arrivals_by_minute: Vec<Vec<u32>>,
}

impl TrafficModel {
    pub fn from_adapter<A: TrafficAdapter>(adapter: &A) -> Result<Self, A::Error> {
        let stations = adapter.stations()?;
        let trips = adapter.trips()?;

        let mut departures_by_minute = vec![Vec::new(); MINUTES_PER_DAY];
        let mut arrivals_by_minute = vec![Vec::new(); MINUTES_PER_DAY];

        for (i, trip) in trips.iter().enumerate() {
            departures_by_minute[trip.start_minute as usize].push(i as u32);
            arrivals_by_minute[trip.end_minute as usize].push(i as u32);
        }

        Ok(Self {
            stations,
            trips,
            departures_by_minute,
            arrivals_by_minute,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Rebuilds per-station traffic under the given filter. Every call
    /// returns fresh snapshot records; the model itself is never mutated.
    pub fn snapshot(&self, filter: TimeFilter) -> Vec<StationSnapshot> {
        let (arrivals, departures) = match filter {
            TimeFilter::AnyTime => (
                self.trips.iter().counts_by(|t| &t.end_station),
                self.trips.iter().counts_by(|t| &t.start_station),
            ),
            TimeFilter::At(minute) => {
                let window = MinuteWindow::around(minute);
                (
                    self.windowed_counts(&self.arrivals_by_minute, window, |t| &t.end_station),
                    self.windowed_counts(&self.departures_by_minute, window, |t| &t.start_station),
                )
            }
        };

        self.stations
            .iter()
            .map(|station| {
                let arrivals = arrivals.get(&station.id).copied().unwrap_or(0);
                let departures = departures.get(&station.id).copied().unwrap_or(0);
                let total_traffic = arrivals + departures;
                let departure_ratio = if total_traffic == 0 {
                    0.0
                } else {
                    departures as f64 / total_traffic as f64
                };

                StationSnapshot {
                    station_id: station.id.clone(),
                    name: station.name.clone(),
                    arrivals,
                    departures,
                    total_traffic,
                    departure_ratio,
                    geometry: geo_types::Point::new(station.lon, station.lat),
                }
            })
            .collect()
    }

    fn windowed_counts<'a>(
        &'a self,
        buckets: &'a [Vec<u32>],
        window: MinuteWindow,
        key: impl Fn(&'a Trip) -> &'a StationId,
    ) -> HashMap<&'a StationId, usize> {
        window
            .ranges()
            .into_iter()
            .flat_map(|range| buckets[range].iter())
            .flatten()
            .map(|&idx| key(&self.trips[idx as usize]))
            .counts()
    }
}
