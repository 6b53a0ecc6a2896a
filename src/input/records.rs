use std::collections::HashSet;

use serde::Deserialize;

use crate::input::source::csv_reader;
use crate::input::{InputError, YearSource};
use crate::model::record::ParticipationRecord;

#[derive(Debug, Deserialize)]
struct RawYearRow {
    #[serde(alias = "Name", alias = "participant")]
    name: String,
    #[serde(alias = "count", alias = "Samosas")]
    samosas: String,
    #[serde(default, alias = "distance", alias = "Miles")]
    miles: Option<String>,
}

pub fn load_year_records(source: &YearSource) -> Result<Vec<ParticipationRecord>, InputError> {
    let path = source.path.as_path();
    let mut reader = csv_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| InputError::csv(path, e))?
        .clone();
    if headers.is_empty() {
        return Err(InputError::parse(path, 1, "year file header is empty"));
    }

    let mut records = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for row in reader.records() {
        let row = row.map_err(|e| InputError::csv(path, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }
        let raw: RawYearRow = row
            .deserialize(Some(&headers))
            .map_err(|e| InputError::csv(path, e))?;

        if raw.name.is_empty() {
            tracing::warn!(
                "{}: row has empty name; skipping (line {})",
                path.display(),
                line
            );
            continue;
        }
        if !seen.insert(raw.name.clone()) {
            tracing::warn!(
                "{}: duplicate participant {:?}; keeping first (line {})",
                path.display(),
                raw.name,
                line
            );
            continue;
        }

        let count = match parse_count(&raw.samosas) {
            Ok(Some(v)) => v,
            Ok(None) => {
                tracing::warn!(
                    "{}: blank count for {:?}; reading as 0 (line {})",
                    path.display(),
                    raw.name,
                    line
                );
                0
            }
            Err(msg) => return Err(InputError::parse(path, line, msg)),
        };
        let distance = match raw.miles.as_deref() {
            None | Some("") => None,
            Some(text) => {
                Some(parse_distance(text).map_err(|msg| InputError::parse(path, line, msg))?)
            }
        };

        records.push(ParticipationRecord {
            name: raw.name,
            year: source.year,
            count,
            distance,
        });
    }

    tracing::debug!(
        "{}: loaded {} record(s) for {}",
        path.display(),
        records.len(),
        source.year
    );
    Ok(records)
}

/// Integer-valued text; `12` and `12.0` are both accepted, blank is `None`.
pub fn parse_count(text: &str) -> Result<Option<u32>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(v) = text.parse::<u32>() {
        return Ok(Some(v));
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            Ok(Some(v as u32))
        }
        _ => Err(format!("count {text:?} is not a non-negative integer")),
    }
}

fn parse_distance(text: &str) -> Result<f64, String> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("distance {text:?} is not a non-negative number")),
    }
}
