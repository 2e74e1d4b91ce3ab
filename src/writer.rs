use std::io::Write;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::TripDashError;
use crate::config::OutputFormat;

/// Writes each summary as one JSON line, replacing any existing file
pub fn write_summaries<T: Serialize>(file: &Path, summaries: &[T]) -> Result<(), TripDashError> {
    serde_jsonlines::write_json_lines(file, summaries)
        .map_err(|e| TripDashError::WriterError { source: e })?;
    info!("Wrote {} summaries to {:?}", summaries.len(), file);
    Ok(())
}

/// Routes summaries to `output` as JSON lines when a file is given. Otherwise
/// each one is written to `out` as rendered text or pretty JSON.
pub fn emit_summaries<T: Serialize, W: Write>(
    items: &[T],
    format: OutputFormat,
    output: Option<&Path>,
    out: &mut W,
    render: impl Fn(&T) -> String,
) -> Result<(), TripDashError> {
    if let Some(output_file) = output {
        return write_summaries(output_file, items);
    }
    for item in items {
        let text = match format {
            OutputFormat::Text => render(item),
            OutputFormat::Json => serde_json::to_string_pretty(item)
                .map_err(|e| TripDashError::SummarySerializeError { source: e })?,
        };
        writeln!(out, "{text}").map_err(|e| TripDashError::WriterError { source: e })?;
    }
    Ok(())
}
