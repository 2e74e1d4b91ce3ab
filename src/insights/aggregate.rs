use itertools::{Itertools, MinMaxResult};
use uom::si::f64::{Length, Velocity};
use uom::si::length::{kilometer, meter};
use uom::si::velocity::{kilometer_per_hour, meter_per_second};

use crate::trip::TripSession;

/// Un-rounded totals for one trip, shared by insights and comparisons.
/// Speeds are reported in km/h, converted once from the m/s point samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripAggregate {
    pub distance_km: f64,
    pub duration_seconds: f64,
    pub avg_speed_kmh: f64,
    pub max_speed_kmh: f64,
    pub min_speed_kmh: f64,
}

impl TripAggregate {
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.
    }
}

pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    Velocity::new::<meter_per_second>(speed_mps).get::<kilometer_per_hour>()
}

pub fn meters_to_km(distance_m: f64) -> f64 {
    Length::new::<meter>(distance_m).get::<kilometer>()
}

/// Reduces a trip to its totals.
/// Returns `None` for a trip without points.
pub fn aggregate(trip: &TripSession) -> Option<TripAggregate> {
    let last = trip.points.last()?;
    let end = trip.end_boundary()?;

    let (min_speed_mps, max_speed_mps) = match trip
        .points
        .iter()
        .map(|p| p.speed)
        .minmax_by(|a, b| a.total_cmp(b))
    {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(speed) => (speed, speed),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    // summation error can push the mean an ulp outside the observed range
    let speed_sum: f64 = trip.points.iter().map(|p| p.speed).sum();
    let avg_speed_mps = (speed_sum / trip.points.len() as f64).clamp(min_speed_mps, max_speed_mps);

    Some(TripAggregate {
        distance_km: meters_to_km(last.distance),
        duration_seconds: (end - trip.session_start).num_milliseconds() as f64 / 1000.,
        avg_speed_kmh: mps_to_kmh(avg_speed_mps),
        max_speed_kmh: mps_to_kmh(max_speed_mps),
        min_speed_kmh: mps_to_kmh(min_speed_mps),
    })
}
