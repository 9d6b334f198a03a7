use std::io::Read;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::feeds::unwrap_container;

/// One row of the trip log. Columns beyond these four are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRecord {
    pub start_station_id: String,
    pub end_station_id: String,
    #[serde(deserialize_with = "parse_timestamp")]
    pub started_at: NaiveDateTime,
    #[serde(deserialize_with = "parse_timestamp")]
    pub ended_at: NaiveDateTime,
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&s, fmt).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("bad timestamp: {s}")))
}

/// Reads the trip log from raw bytes, unwrapping zip/gzip containers first.
pub fn parse_trip_log(bytes: Vec<u8>) -> Result<Vec<TripRecord>> {
    let bytes = unwrap_container(bytes)?;
    read_trips(bytes.as_slice())
}

fn read_trips<R: Read>(reader: R) -> Result<Vec<TripRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();
    for (i, record) in rdr.deserialize::<TripRecord>().enumerate() {
        let record = record.with_context(|| format!("trip log record {}", i + 1))?;
        trips.push(record);
    }
    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const LOG: &[u8] = b"\
ride_id,rideable_type,started_at,ended_at,start_station_id,end_station_id,member_casual
r1,classic_bike,2024-03-01 01:40:00,2024-03-01 01:55:12.345,A32000,B32012,member
r2,electric_bike,2024-03-02T13:20:00,2024-03-02T13:41:09,B32012,A32000,casual
";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let trips = parse_trip_log(LOG.to_vec()).unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].start_station_id, "A32000");
        assert_eq!(trips[0].end_station_id, "B32012");
    }

    #[test]
    fn accepts_both_timestamp_shapes() {
        let trips = parse_trip_log(LOG.to_vec()).unwrap();

        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(1, 40, 0)
            .unwrap();
        assert_eq!(trips[0].started_at, expected);

        let expected = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_milli_opt(13, 41, 9, 0)
            .unwrap();
        assert_eq!(trips[1].ended_at, expected);
    }

    #[test]
    fn fractional_seconds_are_kept_out_of_the_minute() {
        let trips = parse_trip_log(LOG.to_vec()).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(1, 55, 12, 345)
            .unwrap();
        assert_eq!(trips[0].ended_at, expected);
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        let log = b"\
started_at,ended_at,start_station_id,end_station_id
03/01/2024 01:40,2024-03-01 01:55:00,A32000,B32012
";
        let err = parse_trip_log(log.to_vec()).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }
}
