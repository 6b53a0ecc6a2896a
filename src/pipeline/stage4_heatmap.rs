use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

use crate::input::HeatmapTable;
use crate::model::record::{HeatmapCell, HeatmapRow};
use crate::pipeline::stage1_load::{HeatmapSource, Stage1Output, YearRecords};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantTotal {
    pub name: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapLayout {
    pub years: Vec<i32>,
    /// Row order of the grid, highest cross-year total first.
    pub participants: Vec<ParticipantTotal>,
    /// Long-format cells, grouped by participant in row order.
    pub cells: Vec<HeatmapCell>,
}

impl HeatmapLayout {
    pub fn value_range(&self) -> Option<(u32, u32)> {
        let min = self.cells.iter().map(|c| c.value).min()?;
        let max = self.cells.iter().map(|c| c.value).max()?;
        Some((min, max))
    }
}

/// Wide rows to `{participant, year, value}` triples, keeping row order.
pub fn reshape_long(years: &[i32], rows: &[HeatmapRow]) -> Vec<HeatmapCell> {
    let mut cells = Vec::with_capacity(rows.len() * years.len());
    for row in rows {
        for (&year, &value) in years.iter().zip(row.values.iter()) {
            cells.push(HeatmapCell {
                name: row.name.clone(),
                year,
                value,
            });
        }
    }
    cells
}

pub fn row_total(row: &HeatmapRow) -> u64 {
    row.values.iter().map(|&v| v as u64).sum()
}

/// Orders rows by cross-year total, descending; ties keep source order.
pub fn build_layout(table: &HeatmapTable) -> HeatmapLayout {
    let mut ordered = table.rows.clone();
    ordered.sort_by_key(|row| Reverse(row_total(row)));
    let participants = ordered
        .iter()
        .map(|row| ParticipantTotal {
            name: row.name.clone(),
            total: row_total(row),
        })
        .collect();
    let cells = reshape_long(&table.years, &ordered);
    HeatmapLayout {
        years: table.years.clone(),
        participants,
        cells,
    }
}

/// Builds the wide table from loaded year records. Participants appear in
/// first-seen order; years without a record read as 0.
pub fn derive_wide_table(years: &[YearRecords]) -> HeatmapTable {
    let year_list: Vec<i32> = years.iter().map(|y| y.year).collect();
    let mut rows: Vec<HeatmapRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (col, year) in years.iter().enumerate() {
        for record in &year.records {
            let idx = *index.entry(record.name.as_str()).or_insert_with(|| {
                rows.push(HeatmapRow {
                    name: record.name.clone(),
                    values: vec![0; year_list.len()],
                });
                rows.len() - 1
            });
            rows[idx].values[col] = record.count;
        }
    }
    HeatmapTable {
        years: year_list,
        rows,
    }
}

pub fn run_stage4(source: &HeatmapSource, loaded: &Stage1Output) -> Option<HeatmapLayout> {
    let layout = match source {
        HeatmapSource::Disabled => return None,
        HeatmapSource::Derived => build_layout(&derive_wide_table(&loaded.years)),
        HeatmapSource::File(_) => build_layout(loaded.heatmap.as_ref()?),
    };
    tracing::debug!(
        "heatmap layout: {} row(s) x {} year(s)",
        layout.participants.len(),
        layout.years.len()
    );
    Some(layout)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_heatmap.rs"]
mod tests;
