use std::path::Path;

use crate::input::InputError;
use crate::input::records::parse_count;
use crate::input::source::csv_reader;
use crate::model::record::HeatmapRow;

/// Wide-format heatmap source: one row per participant, one column per year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapTable {
    pub years: Vec<i32>,
    pub rows: Vec<HeatmapRow>,
}

pub fn load_heatmap_table(path: &Path) -> Result<HeatmapTable, InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(format!(
            "heatmap file {} not found",
            path.display()
        )));
    }
    let mut reader = csv_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| InputError::csv(path, e))?
        .clone();

    let mut name_col = None;
    let mut year_cols: Vec<(usize, i32)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if header.eq_ignore_ascii_case("name") {
            if name_col.is_none() {
                name_col = Some(idx);
            }
            continue;
        }
        match header.parse::<i32>() {
            Ok(year) => year_cols.push((idx, year)),
            Err(_) => {
                if !header.is_empty() {
                    tracing::warn!(
                        "{}: ignoring non-year heatmap column {:?}",
                        path.display(),
                        header
                    );
                }
            }
        }
    }
    let name_col = name_col
        .ok_or_else(|| InputError::parse(path, 1, "heatmap header has no `name` column"))?;
    if year_cols.is_empty() {
        return Err(InputError::parse(path, 1, "heatmap header has no year columns"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| InputError::csv(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let name = record.get(name_col).unwrap_or("");
        if name.is_empty() {
            if record.iter().any(|f| !f.is_empty()) {
                tracing::warn!(
                    "{}: heatmap row has empty name; skipping (line {})",
                    path.display(),
                    line
                );
            }
            continue;
        }
        let mut values = Vec::with_capacity(year_cols.len());
        for &(idx, _) in &year_cols {
            let raw = record.get(idx).unwrap_or("");
            let value = parse_count(raw)
                .map_err(|msg| InputError::parse(path, line, msg))?
                .unwrap_or(0);
            values.push(value);
        }
        rows.push(HeatmapRow {
            name: name.to_string(),
            values,
        });
    }

    tracing::debug!(
        "{}: loaded {} heatmap row(s) over {} year column(s)",
        path.display(),
        rows.len(),
        year_cols.len()
    );
    Ok(HeatmapTable {
        years: year_cols.into_iter().map(|(_, year)| year).collect(),
        rows,
    })
}
