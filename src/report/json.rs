use serde::Serialize;

use crate::model::record::{HeatmapCell, LifetimeSummary, RankedEntry};
use crate::pipeline::stage2_rank::YearBoard;
use crate::pipeline::stage3_lifetime::LifetimeBoard;
use crate::pipeline::stage4_heatmap::{HeatmapLayout, ParticipantTotal};

#[derive(Debug, Serialize)]
pub struct SummaryData<'a> {
    pub tool: &'a str,
    pub version: &'a str,
    pub title: &'a str,
    pub years: Vec<YearSummary<'a>>,
    pub lifetime: &'a [LifetimeSummary],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<HeatmapSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct YearSummary<'a> {
    pub year: i32,
    pub participants: usize,
    pub total: u64,
    pub leaders: Vec<&'a str>,
    pub entries: &'a [RankedEntry],
}

#[derive(Debug, Serialize)]
pub struct HeatmapSummary<'a> {
    pub years: &'a [i32],
    pub participants: &'a [ParticipantTotal],
    pub cells: &'a [HeatmapCell],
}

pub fn build_summary<'a>(
    title: &'a str,
    years: &'a [YearBoard],
    lifetime: &'a LifetimeBoard,
    heatmap: Option<&'a HeatmapLayout>,
) -> SummaryData<'a> {
    SummaryData {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        title,
        years: years
            .iter()
            .map(|board| YearSummary {
                year: board.year,
                participants: board.entries.len(),
                total: board.entries.iter().map(|e| e.count as u64).sum(),
                leaders: board
                    .entries
                    .iter()
                    .filter(|e| e.rank == 1)
                    .map(|e| e.name.as_str())
                    .collect(),
                entries: &board.entries,
            })
            .collect(),
        lifetime: &lifetime.entries,
        heatmap: heatmap.map(|layout| HeatmapSummary {
            years: &layout.years,
            participants: &layout.participants,
            cells: &layout.cells,
        }),
    }
}

pub fn render_summary_json(data: &SummaryData<'_>) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
