pub mod aggregate;

use log::debug;
use serde::{Deserialize, Serialize};

pub use aggregate::{TripAggregate, aggregate};

use crate::trip::{Location, TripSession, TyreType};

/// Marker shown in place of a duration that could not be computed
pub const UNAVAILABLE: &str = "N/A";

/// Single-trip summary. Numeric fields are `None` when the trip has no points,
/// which serializes as `null` and is distinct from a measured zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub driver_name: Option<String>,
    pub tyre_type: Option<TyreType>,
    pub car_model: Option<String>,
    pub start_location: Option<Location>,
    pub end_location: Option<Location>,
    /// km
    pub total_distance: Option<f64>,
    /// whole seconds
    pub total_time: Option<i64>,
    /// km/h
    pub average_speed: Option<f64>,
    /// km/h
    pub max_speed: Option<f64>,
    /// km/h
    pub min_speed: Option<f64>,
    pub has_data: bool,
}

/// Rounds to two decimals. Halves round away from zero, so a negative value
/// sitting exactly on a half (e.g. `-0.125`) lands 0.01 further from zero than
/// a round-half-up rule would give. A result of zero is always `+0.0`.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.).round() / 100.;
    if rounded == 0. { 0. } else { rounded }
}

pub fn compute_insights(trip: &TripSession) -> InsightSummary {
    if !trip.has_points() {
        debug!("Trip {} has no telemetry points, insights unavailable", trip.id);
    }
    let totals = aggregate(trip);

    InsightSummary {
        driver_name: trip.driver_name.clone(),
        tyre_type: trip.tyre_type,
        car_model: trip.car_model.clone(),
        start_location: trip.start_location.clone(),
        end_location: trip.end_location.clone(),
        total_distance: totals.map(|t| round2(t.distance_km)),
        total_time: totals.map(|t| t.duration_seconds.round() as i64),
        average_speed: totals.map(|t| round2(t.avg_speed_kmh)),
        max_speed: totals.map(|t| round2(t.max_speed_kmh)),
        min_speed: totals.map(|t| round2(t.min_speed_kmh)),
        has_data: totals.is_some(),
    }
}

/// Renders a duration in seconds as minutes with two decimals, e.g. "1.50 min"
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) => format!("{:.2} min", round2(seconds / 60.)),
        None => UNAVAILABLE.to_string(),
    }
}
