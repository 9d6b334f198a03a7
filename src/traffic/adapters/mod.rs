pub mod bluebikes;

use crate::traffic::{Station, Trip};

pub trait TrafficAdapter {
    type Error;

    /// Returns the station directory in feed order.
    fn stations(&self) -> Result<Vec<Station>, Self::Error>;

    /// Returns all trips (any order); the builder derives the minute buckets.
    fn trips(&self) -> Result<Vec<Trip>, Self::Error>;
}
