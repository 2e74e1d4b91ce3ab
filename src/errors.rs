// Error types for tripdash

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum TripDashError {
    // Errors raised by the trip computations
    #[snafu(display("Trip {trip_id} has no telemetry points"))]
    NoTelemetryPoints { trip_id: String },

    // Errors while reading trip files
    #[snafu(display("Invalid trip file: {path}"))]
    InvalidTripFile { path: String },
    #[snafu(display("Error loading trip file"))]
    TripLoaderError { source: io::Error },
    #[snafu(display("Error parsing trip file: {path}"))]
    TripParseError {
        path: String,
        source: serde_json::Error,
    },

    // Errors for the summary writer
    #[snafu(display("Error writing summary file"))]
    WriterError { source: io::Error },
    #[snafu(display("Error serializing summary"))]
    SummarySerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}
