use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// GBFS-style station information document: `{"data": {"stations": [...]}}`.
#[derive(Debug, Deserialize)]
struct StationFeed {
    data: StationFeedData,
}

#[derive(Debug, Deserialize)]
struct StationFeedData {
    stations: Vec<StationRecord>,
}

/// One station from the information feed. Coordinates tolerate both number
/// and string encodings; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub short_name: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lon: f64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(v) => Ok(v),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub fn parse_station_feed(bytes: &[u8]) -> Result<Vec<StationRecord>> {
    let feed: StationFeed =
        serde_json::from_slice(bytes).context("parsing station information JSON")?;
    Ok(feed.data.stations)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &[u8] = br#"{
        "last_updated": 1709300000,
        "data": {
            "stations": [
                {
                    "station_id": "1",
                    "short_name": "A32000",
                    "name": "Central Square",
                    "lat": 42.3656,
                    "lon": "-71.1043",
                    "capacity": 19
                },
                {
                    "station_id": "2",
                    "short_name": "B32012",
                    "name": "Kendall T",
                    "lat": 42.3621,
                    "lon": -71.0842
                }
            ]
        }
    }"#;

    #[test]
    fn parses_the_nested_station_collection() {
        let stations = parse_station_feed(FEED).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].short_name, "A32000");
        assert_eq!(stations[0].name, "Central Square");
    }

    #[test]
    fn coordinates_accept_number_or_string() {
        let stations = parse_station_feed(FEED).unwrap();
        assert_eq!(stations[0].lon, -71.1043);
        assert_eq!(stations[1].lon, -71.0842);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_station_feed(b"{\"data\": {}}").is_err());
        assert!(parse_station_feed(b"not json").is_err());
    }
}
