use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use crate::{TripDashError, trip::TripSession};

const ARCHIVE_EXTENSION: &str = "jsonl";

/// Loads a single trip document
pub fn load_trip(source_file: &Path) -> Result<TripSession, TripDashError> {
    if !source_file.exists() {
        return Err(TripDashError::InvalidTripFile {
            path: format!("{:?}", source_file),
        });
    }

    let content = fs::read_to_string(source_file)
        .map_err(|e| TripDashError::TripLoaderError { source: e })?;
    let trip: TripSession =
        serde_json::from_str(&content).map_err(|e| TripDashError::TripParseError {
            path: format!("{:?}", source_file),
            source: e,
        })?;

    debug!(
        "Loaded trip {} from {:?} with {} points",
        trip.id,
        source_file,
        trip.points.len()
    );
    Ok(trip)
}

/// Loads every trip in a file. `.jsonl` archives hold one trip per line, any
/// other file is read as a single trip document.
pub fn load_trips(source_file: &Path) -> Result<Vec<TripSession>, TripDashError> {
    let is_archive = source_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION));
    if !is_archive {
        return load_trip(source_file).map(|trip| vec![trip]);
    }
    if !source_file.exists() {
        return Err(TripDashError::InvalidTripFile {
            path: format!("{:?}", source_file),
        });
    }

    let trips = serde_jsonlines::json_lines(source_file)
        .map_err(|e| TripDashError::TripLoaderError { source: e })?
        .collect::<Result<Vec<TripSession>, io::Error>>()
        .map_err(|e| archive_line_error(source_file, e))?;

    info!("Loaded {:?}, found {} trips", source_file, trips.len());
    Ok(trips)
}

/// serde-jsonlines wraps a bad line's `serde_json::Error` in an `io::Error`.
/// Unwrap it so a malformed archive reports the same way as a malformed document.
fn archive_line_error(source_file: &Path, error: io::Error) -> TripDashError {
    if !error
        .get_ref()
        .is_some_and(|inner| inner.is::<serde_json::Error>())
    {
        return TripDashError::TripLoaderError { source: error };
    }

    let kind = error.kind();
    match error.into_inner().map(|inner| inner.downcast::<serde_json::Error>()) {
        Some(Ok(source)) => TripDashError::TripParseError {
            path: format!("{:?}", source_file),
            source: *source,
        },
        Some(Err(inner)) => TripDashError::TripLoaderError {
            source: io::Error::new(kind, inner),
        },
        None => TripDashError::TripLoaderError {
            source: io::Error::from(kind),
        },
    }
}
