use std::path::PathBuf;
use std::thread;

use crate::input::{HeatmapTable, InputError, YearSource, load_heatmap_table, load_year_records};
use crate::model::record::ParticipationRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeatmapSource {
    File(PathBuf),
    Derived,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub years: Vec<YearSource>,
    pub heatmap: HeatmapSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearRecords {
    pub year: i32,
    pub records: Vec<ParticipationRecord>,
}

#[derive(Debug)]
pub struct Stage1Output {
    /// In plan order, one entry per requested year.
    pub years: Vec<YearRecords>,
    pub heatmap: Option<HeatmapTable>,
}

impl Stage1Output {
    pub fn all_records(&self) -> impl Iterator<Item = &ParticipationRecord> {
        self.years.iter().flat_map(|y| y.records.iter())
    }

    pub fn year_list(&self) -> Vec<i32> {
        self.years.iter().map(|y| y.year).collect()
    }
}

/// Loads every year file and the heatmap file concurrently and returns only
/// once all of them have finished. Any failure aborts the whole load.
pub fn run_stage1(plan: &LoadPlan) -> Result<Stage1Output, InputError> {
    let (year_results, heatmap_result) = thread::scope(|s| {
        let year_handles: Vec<_> = plan
            .years
            .iter()
            .map(|source| s.spawn(move || load_year_records(source)))
            .collect();
        let heatmap_handle = match &plan.heatmap {
            HeatmapSource::File(path) => Some(s.spawn(move || load_heatmap_table(path))),
            HeatmapSource::Derived | HeatmapSource::Disabled => None,
        };

        let year_results: Vec<Result<Vec<ParticipationRecord>, InputError>> = year_handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| Err(worker_panicked("year loader"))))
            .collect();
        let heatmap_result = heatmap_handle.map(|h| {
            h.join()
                .unwrap_or_else(|_| Err(worker_panicked("heatmap loader")))
        });
        (year_results, heatmap_result)
    });

    let mut years = Vec::with_capacity(plan.years.len());
    for (source, result) in plan.years.iter().zip(year_results) {
        let records = result?;
        tracing::info!(
            "loaded {} record(s) for {} from {}",
            records.len(),
            source.year,
            source.path.display()
        );
        years.push(YearRecords {
            year: source.year,
            records,
        });
    }
    let heatmap = heatmap_result.transpose()?;
    if let Some(table) = &heatmap {
        tracing::info!(
            "loaded heatmap table: {} participant(s), years {:?}",
            table.rows.len(),
            table.years
        );
    }

    Ok(Stage1Output { years, heatmap })
}

fn worker_panicked(what: &str) -> InputError {
    InputError::InvalidInput(format!("{what} thread panicked"))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;
