use serde::{Deserialize, Serialize};

use crate::model::color::{ColorRamp, Rgb};

pub const COMPACT_BREAKPOINT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn desktop_v1() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }

    pub fn is_compact(&self) -> bool {
        self.width < COMPACT_BREAKPOINT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteProfile {
    pub title: String,
    pub table_ramp: ColorRamp,
    pub heatmap_ramp: ColorRamp,
    pub label_light: Rgb,
    pub label_dark: Rgb,
    pub viewport: Viewport,
    pub count_label: String,
}

impl SiteProfile {
    pub fn default_v1() -> Self {
        Self {
            title: "Samosa Stumble".to_string(),
            table_ramp: ColorRamp::table_v1(),
            heatmap_ramp: ColorRamp::heatmap_v1(),
            label_light: Rgb::WHITE,
            label_dark: Rgb::BLACK,
            viewport: Viewport::desktop_v1(),
            count_label: "Samosas".to_string(),
        }
    }
}
