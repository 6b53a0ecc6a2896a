use crate::model::color::{ColorRamp, Rgb};
use crate::model::profile::SiteProfile;
use crate::model::record::BoardKey;
use crate::pipeline::stage2_rank::YearBoard;
use crate::pipeline::stage3_lifetime::LifetimeBoard;
use crate::pipeline::stage4_heatmap::HeatmapLayout;

/// Linear value-to-colour mapping over an observed `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMapper {
    ramp: ColorRamp,
    min: f64,
    max: f64,
}

impl ColorMapper {
    pub fn new(ramp: ColorRamp, min: f64, max: f64) -> Self {
        Self { ramp, min, max }
    }

    pub fn from_range(ramp: ColorRamp, range: Option<(f64, f64)>) -> Self {
        let (min, max) = range.unwrap_or((0.0, 0.0));
        Self::new(ramp, min, max)
    }

    /// A collapsed range (single distinct value) always maps to the low colour,
    /// where a d3 linear scale would give the midpoint of the ramp.
    pub fn color_for(&self, value: f64) -> Rgb {
        let span = self.max - self.min;
        if span.is_nan() || span <= 0.0 {
            return self.ramp.low;
        }
        self.ramp.low.lerp(self.ramp.high, (value - self.min) / span)
    }
}

/// Four-bucket quantile over the value extent: the top bucket gets the dark
/// label, the rest the light one. Zero values carry no label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelContrast {
    threshold: f64,
    light: Rgb,
    dark: Rgb,
}

impl LabelContrast {
    pub fn new(min: f64, max: f64, light: Rgb, dark: Rgb) -> Self {
        Self {
            threshold: min + 0.75 * (max - min),
            light,
            dark,
        }
    }

    pub fn label_for(&self, value: u32) -> Option<Rgb> {
        if value == 0 {
            return None;
        }
        if value as f64 >= self.threshold {
            Some(self.dark)
        } else {
            Some(self.light)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow {
    pub participant_id: Option<usize>,
    pub rank: u32,
    pub name: String,
    pub value: u64,
    pub years_participated: Option<u32>,
    pub fill: Rgb,
}

impl BoardRow {
    pub fn is_leader(&self) -> bool {
        self.rank == 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardTable {
    pub key: BoardKey,
    pub rows: Vec<BoardRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintedCell {
    pub name: String,
    pub year: i32,
    pub value: u32,
    pub fill: Rgb,
    pub label: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    pub years: Vec<i32>,
    pub participants: Vec<String>,
    pub cells: Vec<PaintedCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage5Output {
    pub years: Vec<BoardTable>,
    pub lifetime: BoardTable,
    pub heatmap: Option<HeatmapGrid>,
}

pub fn paint_year_board(board: &YearBoard, ramp: ColorRamp) -> BoardTable {
    let range = board.count_range().map(|(lo, hi)| (lo as f64, hi as f64));
    let mapper = ColorMapper::from_range(ramp, range);
    let rows = board
        .entries
        .iter()
        .map(|e| BoardRow {
            participant_id: None,
            rank: e.rank,
            name: e.name.clone(),
            value: e.count as u64,
            years_participated: None,
            fill: mapper.color_for(e.count as f64),
        })
        .collect();
    BoardTable {
        key: BoardKey::Year(board.year),
        rows,
    }
}

pub fn paint_lifetime_board(board: &LifetimeBoard, ramp: ColorRamp) -> BoardTable {
    let range = board.total_range().map(|(lo, hi)| (lo as f64, hi as f64));
    let mapper = ColorMapper::from_range(ramp, range);
    let rows = board
        .entries
        .iter()
        .map(|e| BoardRow {
            participant_id: Some(e.participant_id),
            rank: e.rank,
            name: e.name.clone(),
            value: e.total,
            years_participated: Some(e.years_participated),
            fill: mapper.color_for(e.total as f64),
        })
        .collect();
    BoardTable {
        key: BoardKey::Lifetime,
        rows,
    }
}

pub fn paint_heatmap(layout: &HeatmapLayout, profile: &SiteProfile) -> HeatmapGrid {
    let (min, max) = layout
        .value_range()
        .map(|(lo, hi)| (lo as f64, hi as f64))
        .unwrap_or((0.0, 0.0));
    let mapper = ColorMapper::new(profile.heatmap_ramp, min, max);
    let contrast = LabelContrast::new(min, max, profile.label_light, profile.label_dark);
    let cells = layout
        .cells
        .iter()
        .map(|c| PaintedCell {
            name: c.name.clone(),
            year: c.year,
            value: c.value,
            fill: mapper.color_for(c.value as f64),
            label: contrast.label_for(c.value),
        })
        .collect();
    HeatmapGrid {
        years: layout.years.clone(),
        participants: layout.participants.iter().map(|p| p.name.clone()).collect(),
        cells,
    }
}

pub fn run_stage5(
    years: &[YearBoard],
    lifetime: &LifetimeBoard,
    heatmap: Option<&HeatmapLayout>,
    profile: &SiteProfile,
) -> Stage5Output {
    Stage5Output {
        years: years
            .iter()
            .map(|b| paint_year_board(b, profile.table_ramp))
            .collect(),
        lifetime: paint_lifetime_board(lifetime, profile.table_ramp),
        heatmap: heatmap.map(|layout| paint_heatmap(layout, profile)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_color.rs"]
mod tests;
