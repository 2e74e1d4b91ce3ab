// Relative deltas between two trips

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::TripDashError;
use crate::insights::{TripAggregate, aggregate, round2};
use crate::trip::TripSession;

/// Percentage change against the comparison trip. A zero baseline has no
/// defined percentage and is reported as `Unavailable` (`null` in JSON).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum PercentageDiff {
    Value(f64),
    Unavailable,
}

impl PercentageDiff {
    pub fn value(&self) -> Option<f64> {
        match self {
            PercentageDiff::Value(value) => Some(*value),
            PercentageDiff::Unavailable => None,
        }
    }
}

impl From<Option<f64>> for PercentageDiff {
    fn from(value: Option<f64>) -> Self {
        value.map_or(PercentageDiff::Unavailable, PercentageDiff::Value)
    }
}

impl From<PercentageDiff> for Option<f64> {
    fn from(value: PercentageDiff) -> Self {
        value.value()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub current: f64,
    pub comparison: f64,
    pub difference: f64,
    pub percentage_diff: PercentageDiff,
}

impl MetricComparison {
    /// Diffs two un-rounded values, rounding each reported number afterwards
    pub fn between(current: f64, comparison: f64) -> Self {
        let difference = current - comparison;
        let percentage = difference / comparison * 100.;
        let percentage_diff = if comparison == 0. || !percentage.is_finite() {
            PercentageDiff::Unavailable
        } else {
            PercentageDiff::Value(round2(percentage))
        };

        Self {
            current: round2(current),
            comparison: round2(comparison),
            difference: round2(difference),
            percentage_diff,
        }
    }
}

/// Units: distance km, time minutes, speeds km/h
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total_distance: MetricComparison,
    pub total_time: MetricComparison,
    pub average_speed: MetricComparison,
    pub max_speed: MetricComparison,
}

impl ComparisonSummary {
    pub fn metrics(&self) -> [(&'static str, &MetricComparison); 4] {
        [
            ("Total Distance", &self.total_distance),
            ("Total Time", &self.total_time),
            ("Average Speed", &self.average_speed),
            ("Max Speed", &self.max_speed),
        ]
    }
}

fn require_totals(trip: &TripSession) -> Result<TripAggregate, TripDashError> {
    aggregate(trip).ok_or_else(|| TripDashError::NoTelemetryPoints {
        trip_id: trip.id.clone(),
    })
}

pub fn compare_trips(
    current: &TripSession,
    comparison: &TripSession,
) -> Result<ComparisonSummary, TripDashError> {
    let current_totals = require_totals(current)?;
    let comparison_totals = require_totals(comparison)?;
    debug!(
        "Comparing trip {} ({:?}) against {} ({:?})",
        current.id, current_totals, comparison.id, comparison_totals
    );

    Ok(ComparisonSummary {
        total_distance: MetricComparison::between(
            current_totals.distance_km,
            comparison_totals.distance_km,
        ),
        total_time: MetricComparison::between(
            current_totals.duration_minutes(),
            comparison_totals.duration_minutes(),
        ),
        average_speed: MetricComparison::between(
            current_totals.avg_speed_kmh,
            comparison_totals.avg_speed_kmh,
        ),
        max_speed: MetricComparison::between(
            current_totals.max_speed_kmh,
            comparison_totals.max_speed_kmh,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::TelemetryPoint;
    use chrono::DateTime;
    use proptest::prelude::*;

    fn trip(id: &str, speeds: &[f64], distances: &[f64]) -> TripSession {
        TripSession {
            id: id.to_string(),
            session_end: DateTime::from_timestamp(2, 0),
            points: speeds
                .iter()
                .zip(distances)
                .enumerate()
                .map(|(i, (speed, distance))| TelemetryPoint {
                    index: i as i64,
                    timestamp: DateTime::from_timestamp(i as i64, 0).unwrap(),
                    speed: *speed,
                    distance: *distance,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_double_speed_trip() {
        let a = trip("a", &[10., 20., 30.], &[0., 500., 1000.]);
        let b = trip("b", &[5., 10., 15.], &[0., 500., 1000.]);
        let summary = compare_trips(&a, &b).unwrap();

        assert_eq!(summary.average_speed.current, 72.);
        assert_eq!(summary.average_speed.comparison, 36.);
        assert_eq!(summary.average_speed.difference, 36.);
        assert_eq!(summary.average_speed.percentage_diff, PercentageDiff::Value(100.));

        assert_eq!(summary.max_speed.current, 108.);
        assert_eq!(summary.max_speed.comparison, 54.);
        assert_eq!(summary.max_speed.percentage_diff, PercentageDiff::Value(100.));

        assert_eq!(summary.total_distance.current, 1.);
        assert_eq!(summary.total_distance.difference, 0.);
        assert_eq!(summary.total_distance.percentage_diff, PercentageDiff::Value(0.));

        assert_eq!(summary.total_time.current, round2(2. / 60.));
        assert_eq!(summary.total_time.difference, 0.);
    }

    #[test]
    fn test_trip_against_itself() {
        let a = trip("a", &[3., 14., 15., 9.], &[0., 26., 53., 58.]);
        let summary = compare_trips(&a, &a).unwrap();
        for (name, metric) in summary.metrics() {
            assert_eq!(metric.difference, 0., "{name}");
            assert_eq!(metric.percentage_diff, PercentageDiff::Value(0.), "{name}");
        }
    }

    #[test]
    fn test_zero_baseline_is_unavailable() {
        let moving = trip("moving", &[10., 10.], &[0., 20.]);
        let parked = trip("parked", &[0., 0.], &[0., 0.]);
        let summary = compare_trips(&moving, &parked).unwrap();

        assert_eq!(summary.average_speed.percentage_diff, PercentageDiff::Unavailable);
        assert_eq!(summary.max_speed.percentage_diff, PercentageDiff::Unavailable);
        assert_eq!(summary.total_distance.percentage_diff, PercentageDiff::Unavailable);
        assert_eq!(summary.average_speed.difference, 36.);

        let json = serde_json::to_value(summary).unwrap();
        assert!(json["averageSpeed"]["percentageDiff"].is_null());
        assert_eq!(json["averageSpeed"]["difference"], 36.0);
    }

    #[test]
    fn test_zero_against_zero_is_unavailable() {
        let parked = trip("parked", &[0.], &[0.]);
        let summary = compare_trips(&parked, &parked).unwrap();
        assert_eq!(summary.max_speed.difference, 0.);
        assert_eq!(summary.max_speed.percentage_diff, PercentageDiff::Unavailable);
    }

    #[test]
    fn test_empty_trip_rejected() {
        let a = trip("a", &[10.], &[0.]);
        let empty = trip("empty", &[], &[]);

        match compare_trips(&a, &empty) {
            Err(TripDashError::NoTelemetryPoints { trip_id }) => assert_eq!(trip_id, "empty"),
            other => panic!("Expected NoTelemetryPoints error, got {other:?}"),
        }
        assert!(matches!(
            compare_trips(&empty, &a),
            Err(TripDashError::NoTelemetryPoints { .. })
        ));
    }

    #[test]
    fn test_rounding_after_arithmetic() {
        // subtracting the rounded values would report 0.01
        let metric = MetricComparison::between(1.006, 1.004);
        assert_eq!(metric.current, 1.01);
        assert_eq!(metric.comparison, 1.);
        assert_eq!(metric.difference, 0.);
        assert_eq!(metric.percentage_diff, PercentageDiff::Value(0.2));
    }

    #[test]
    fn test_tiny_negative_delta_serializes_as_zero() {
        let metric = MetricComparison::between(1.0, 1.00001);
        assert!(metric.difference.is_sign_positive());
        let json = serde_json::to_string(&metric).unwrap();
        assert!(json.contains(r#""difference":0.0"#), "{json}");
        assert!(json.contains(r#""percentageDiff":0.0"#), "{json}");
        assert!(!json.contains("-0.0"), "{json}");
    }

    #[test]
    fn test_percentage_diff_roundtrip() {
        let json = serde_json::to_string(&MetricComparison::between(3., 2.)).unwrap();
        let parsed: MetricComparison = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.percentage_diff, PercentageDiff::Value(50.));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_percentage_is_always_finite(
            current in 0.0f64..500.0,
            comparison in prop_oneof![Just(0.0f64), 0.01f64..500.0],
        ) {
            let metric = MetricComparison::between(current, comparison);
            prop_assert!(metric.difference.is_finite());
            match metric.percentage_diff {
                PercentageDiff::Value(value) => prop_assert!(value.is_finite()),
                PercentageDiff::Unavailable => prop_assert_eq!(comparison, 0.),
            }
        }
    }
}
