pub(crate) mod timestamp;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TyreType {
    Winter,
    Summer,
    #[serde(rename = "All-Season")]
    AllSeason,
}

impl fmt::Display for TyreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TyreType::Winter => write!(f, "Winter"),
            TyreType::Summer => write!(f, "Summer"),
            TyreType::AllSeason => write!(f, "All-Season"),
        }
    }
}

/// Structured place descriptor for the start or end of a trip
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    pub city: String,
    pub street: String,
    pub district: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.district)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TelemetryPoint {
    /// Sample ordinal, increasing along the trip but not necessarily starting at 0
    pub index: i64,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Instantaneous speed, m/s
    pub speed: f64,
    /// Cumulative meters from trip start
    pub distance: f64,
}

impl Default for TelemetryPoint {
    fn default() -> Self {
        Self {
            index: 0,
            timestamp: DateTime::<Utc>::default(),
            longitude: 0.,
            latitude: 0.,
            speed: 0.,
            distance: 0.,
        }
    }
}

/// One uploaded telemetry recording covering a single continuous drive.
///
/// Field names on the wire follow the upload payload, which mixes snake_case
/// session fields with camelCase descriptive fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TripSession {
    pub id: String,
    pub session_id: i64,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub session_start: DateTime<Utc>,
    /// When absent the last point's timestamp bounds the trip
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub session_end: Option<DateTime<Utc>>,
    #[serde(default, rename = "driverName")]
    pub driver_name: Option<String>,
    #[serde(default, rename = "tyreType")]
    pub tyre_type: Option<TyreType>,
    #[serde(default, rename = "carModel")]
    pub car_model: Option<String>,
    #[serde(default, rename = "startLocation")]
    pub start_location: Option<Location>,
    #[serde(default, rename = "endLocation")]
    pub end_location: Option<Location>,
    /// Samples in chronological order
    #[serde(default, rename = "data")]
    pub points: Vec<TelemetryPoint>,
}

impl Default for TripSession {
    fn default() -> Self {
        Self {
            id: String::new(),
            session_id: 0,
            session_start: DateTime::<Utc>::default(),
            session_end: None,
            driver_name: None,
            tyre_type: None,
            car_model: None,
            start_location: None,
            end_location: None,
            points: Vec::new(),
        }
    }
}

impl TripSession {
    pub fn has_points(&self) -> bool {
        !self.points.is_empty()
    }

    /// End of the trip: `session_end` when recorded, otherwise the last point's timestamp
    pub fn end_boundary(&self) -> Option<DateTime<Utc>> {
        self.session_end
            .or_else(|| self.points.last().map(|p| p.timestamp))
    }

    /// Quick-access descriptors used when listing trips
    pub fn metadata(&self) -> TripMetadata {
        TripMetadata {
            id: self.id.clone(),
            session_id: self.session_id,
            driver_name: self.driver_name.clone(),
            car_model: self.car_model.clone(),
            tyre_type: self.tyre_type,
            start_location: self.start_location.clone(),
            end_location: self.end_location.clone(),
            point_count: self.points.len(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripMetadata {
    pub id: String,
    pub session_id: i64,
    pub driver_name: Option<String>,
    pub car_model: Option<String>,
    pub tyre_type: Option<TyreType>,
    pub start_location: Option<Location>,
    pub end_location: Option<Location>,
    pub point_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPLOAD: &str = r#"{
        "id": "6f1c1a4e-4a55-4a1c-9f0e-2b8f4d7f0c11",
        "session_id": 42,
        "session_start": 1700000000,
        "session_end": null,
        "driverName": "Alex",
        "tyreType": "All-Season",
        "carModel": "Model 3",
        "startLocation": {"longitude": 13.4, "latitude": 52.5, "city": "Berlin", "street": "Unter den Linden", "district": "Mitte"},
        "data": [
            {"index": 3, "timestamp": 1700000000, "longitude": 13.4, "latitude": 52.5, "speed": 0.0, "distance": 0.0},
            {"index": 4, "timestamp": "2023-11-14T22:14:05Z", "longitude": 13.41, "latitude": 52.51, "speed": 12.5, "distance": 410.0}
        ]
    }"#;

    #[test]
    fn test_upload_payload_deserializes() {
        let trip: TripSession = serde_json::from_str(UPLOAD).unwrap();
        assert_eq!(trip.session_id, 42);
        assert_eq!(trip.tyre_type, Some(TyreType::AllSeason));
        assert_eq!(trip.points.len(), 2);
        assert_eq!(trip.points[0].index, 3);
        assert!(trip.end_location.is_none());
        assert_eq!(trip.start_location.as_ref().unwrap().to_string(), "Berlin, Mitte");
    }

    #[test]
    fn test_end_boundary_falls_back_to_last_point() {
        let trip: TripSession = serde_json::from_str(UPLOAD).unwrap();
        let end = trip.end_boundary().unwrap();
        assert_eq!((end - trip.session_start).num_seconds(), 45);
    }

    #[test]
    fn test_end_boundary_prefers_session_end() {
        let mut trip: TripSession = serde_json::from_str(UPLOAD).unwrap();
        trip.session_end = DateTime::from_timestamp(1700000100, 0);
        assert_eq!(trip.end_boundary(), trip.session_end);
    }

    #[test]
    fn test_end_boundary_empty_trip() {
        let trip = TripSession::default();
        assert!(!trip.has_points());
        assert!(trip.end_boundary().is_none());
    }

    #[test]
    fn test_unknown_tyre_type_rejected() {
        let payload = UPLOAD.replace("All-Season", "Slick");
        assert!(serde_json::from_str::<TripSession>(&payload).is_err());
    }

    #[test]
    fn test_metadata_counts_points() {
        let trip: TripSession = serde_json::from_str(UPLOAD).unwrap();
        let metadata = trip.metadata();
        assert_eq!(metadata.point_count, 2);
        assert_eq!(metadata.driver_name.as_deref(), Some("Alex"));
        assert_eq!(metadata.car_model.as_deref(), Some("Model 3"));
    }
}
