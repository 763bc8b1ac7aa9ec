//! JSON line-delimited logging of sensor evaluations.
//!
//! The metric functions themselves never log; recording an evaluation is an
//! explicit caller action. Entries are appended to
//! `logs/evaluations.jsonl`, one JSON object per line.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::evaluation::SensorEvaluation;

fn log_dir() -> io::Result<()> {
    fs::create_dir_all("logs")
}

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

#[derive(Debug, Serialize)]
pub struct EvaluationLogEntry {
    pub timestamp_ms: u128,
    pub samples: usize,
    pub channels: usize,
    pub luther_loss: f32,
    pub vora_value: f32,
    pub vora_loss: f32,
}

/// Append one evaluation to `logs/evaluations.jsonl`.
pub fn log_evaluation(evaluation: &SensorEvaluation) -> io::Result<()> {
    log_dir()?;
    let entry = EvaluationLogEntry {
        timestamp_ms: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
        samples: evaluation.samples,
        channels: evaluation.channels,
        luther_loss: evaluation.luther_loss,
        vora_value: evaluation.vora_value,
        vora_loss: evaluation.vora_loss,
    };
    append_json_line("logs/evaluations.jsonl", &entry)
}
