// Plain-text rendering of summaries for the terminal

use std::fmt::Write;

use itertools::Itertools;

use crate::comparison::{ComparisonSummary, MetricComparison, PercentageDiff};
use crate::insights::{InsightSummary, UNAVAILABLE, format_duration};
use crate::trip::TripMetadata;

const UNKNOWN: &str = "Unknown";

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), |v| format!("{v:.2} {unit}"))
}

pub fn render_insights(insights: &InsightSummary) -> String {
    let mut out = String::new();
    let tyre_type = insights.tyre_type.map(|t| t.to_string());
    let _ = writeln!(out, "Driver Name:    {}", or_unknown(insights.driver_name.as_deref()));
    let _ = writeln!(out, "Car Model:      {}", or_unknown(insights.car_model.as_deref()));
    let _ = writeln!(out, "Tyre Type:      {}", or_unknown(tyre_type.as_deref()));
    if let Some(start) = &insights.start_location {
        let _ = writeln!(out, "Start Location: {start}");
    }
    if let Some(end) = &insights.end_location {
        let _ = writeln!(out, "End Location:   {end}");
    }

    if !insights.has_data {
        let _ = writeln!(out, "No driving data available for this trip.");
        return out;
    }

    let _ = writeln!(
        out,
        "Total Time:     {}",
        format_duration(insights.total_time.map(|t| t as f64))
    );
    let _ = writeln!(out, "Total Distance: {}", with_unit(insights.total_distance, "km"));
    let _ = writeln!(out, "Average Speed:  {}", with_unit(insights.average_speed, "km/h"));
    let _ = writeln!(out, "Maximum Speed:  {}", with_unit(insights.max_speed, "km/h"));
    let _ = writeln!(out, "Minimum Speed:  {}", with_unit(insights.min_speed, "km/h"));
    out
}

fn render_metric(label: &str, metric: &MetricComparison, unit: &str) -> String {
    let arrow = if metric.difference > 0. { '↑' } else { '↓' };
    let percentage = match metric.percentage_diff {
        PercentageDiff::Value(p) if p > 0. => format!("+{p:.2}%"),
        PercentageDiff::Value(p) => format!("{p:.2}%"),
        PercentageDiff::Unavailable => UNAVAILABLE.to_string(),
    };
    format!(
        "{label}: {:.2} {unit} vs {:.2} {unit} ({arrow} {:.2} {unit}, {percentage})",
        metric.current,
        metric.comparison,
        metric.difference.abs()
    )
}

pub fn render_comparison(summary: &ComparisonSummary) -> String {
    summary
        .metrics()
        .into_iter()
        .zip(["km", "min", "km/h", "km/h"])
        .map(|((label, metric), unit)| render_metric(label, metric, unit))
        .join("\n")
}

pub fn render_listing(trips: &[TripMetadata]) -> String {
    trips
        .iter()
        .map(|trip| {
            let route = match (&trip.start_location, &trip.end_location) {
                (Some(start), Some(end)) => format!("{start} -> {end}"),
                (Some(start), None) => format!("{start} -> ?"),
                (None, Some(end)) => format!("? -> {end}"),
                (None, None) => "-".to_string(),
            };
            format!(
                "{} [session {}] {} / {} / {} points / {route}",
                trip.id,
                trip.session_id,
                or_unknown(trip.driver_name.as_deref()),
                or_unknown(trip.car_model.as_deref()),
                trip.point_count,
            )
        })
        .join("\n")
}
