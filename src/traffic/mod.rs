use geojson::{Feature, FeatureCollection, ser::serialize_geometry};
use serde::{Deserialize, Serialize};

pub mod adapters;
mod clock;
mod model;
mod window;

pub use clock::{MINUTES_PER_DAY, format_minute, minute_of_day};
pub use model::{Station, TrafficModel, Trip};
pub use window::MinuteWindow;

/// Stable short identifier for a station. The trip log references stations
/// by this value, not by the feed's internal numeric id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minute-of-day selector driven by the frontend slider; the slider emits -1
/// for "any time".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFilter {
    AnyTime,
    At(u16),
}

impl TimeFilter {
    pub fn from_slider(raw: i32) -> Option<Self> {
        match raw {
            -1 => Some(Self::AnyTime),
            m if (0..MINUTES_PER_DAY as i32).contains(&m) => Some(Self::At(m as u16)),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<String> {
        match self {
            Self::AnyTime => None,
            Self::At(minute) => Some(format_minute(*minute)),
        }
    }
}

/// Per-station traffic under the active time filter, ready for the map layer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
    pub station_id: StationId,
    pub name: String,
    pub arrivals: usize,
    pub departures: usize,
    pub total_traffic: usize,
    pub departure_ratio: f64,
    #[serde(serialize_with = "serialize_geometry")]
    pub geometry: geo_types::Point<f64>,
}

pub fn to_feature_collection(snapshots: &[StationSnapshot]) -> anyhow::Result<FeatureCollection> {
    let features = snapshots
        .iter()
        .map(|s| geojson::ser::to_feature(s))
        .collect::<Result<Vec<Feature>, geojson::Error>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}
