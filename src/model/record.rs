use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipationRecord {
    pub name: String,
    pub year: i32,
    pub count: u32,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: u32,
    pub distance: Option<f64>,
    pub rank: u32,
    pub tie_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifetimeSummary {
    pub participant_id: usize,
    pub name: String,
    pub total: u64,
    pub years_participated: u32,
    pub rank: u32,
    pub tie_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapRow {
    pub name: String,
    /// Values in the same order as the owning table's year columns.
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub name: String,
    pub year: i32,
    pub value: u32,
}

/// Logical board identity, independent of where it ends up in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoardKey {
    Year(i32),
    Lifetime,
    Heatmap,
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardKey::Year(year) => write!(f, "{year}"),
            BoardKey::Lifetime => f.write_str("lifetime"),
            BoardKey::Heatmap => f.write_str("heatmap"),
        }
    }
}
