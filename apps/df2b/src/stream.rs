//! Record-stream processing
//!
//! The input envelope matches the upstream collector: newline-delimited
//! JSON objects with PascalCase fields, where `Value` is itself a JSON
//! document holding the build-file text under `Contents`.

use serde::Deserialize;
use std::io::{Read, Write};
use tracing::{error, info};

use df2b_translate::Engine;
use df2b_types::StageContext;

use crate::error::CliError;

/// Outer record on the input stream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Record {
    id: String,
    value: String,
}

/// Inner document carried in `Record::value`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Payload {
    contents: String,
}

/// Totals for one stream run.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamSummary {
    pub stages: usize,
    pub failed: usize,
}

/// Translate every record on `input`, writing lines to `output`.
///
/// A record that fails to parse or translate is logged with its stage
/// identifier and counted; the stream keeps going. Only a syntax error
/// in the outer envelope itself aborts the run.
pub fn process<R: Read, W: Write>(
    input: R,
    mut output: W,
    engine: &mut Engine,
) -> Result<StreamSummary, CliError> {
    let mut summary = StreamSummary::default();

    for record in serde_json::Deserializer::from_reader(input).into_iter::<Record>() {
        let record = record.map_err(|e| CliError::Envelope(e.to_string()))?;
        summary.stages += 1;

        let payload: Payload = match serde_json::from_str(&record.value) {
            Ok(payload) => payload,
            Err(e) => {
                error!(stage = %record.id, error = %e, "record payload is not valid JSON");
                summary.failed += 1;
                continue;
            }
        };

        let outcome = engine.run_stage(StageContext::new(&record.id), &payload.contents);
        for line in &outcome.lines {
            writeln!(output, "{line}")?;
        }
        if outcome.failed() {
            summary.failed += 1;
        }
    }

    info!(
        stages = summary.stages,
        failed = summary.failed,
        "stream complete"
    );
    Ok(summary)
}
