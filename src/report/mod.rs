use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::model::record::BoardKey;

pub mod html;
pub mod json;
pub mod svg;
pub mod text;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialise summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no render target registered for board {0}")]
    MissingTarget(BoardKey),
}

/// Maps each logical board to the element id it is rendered into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTargets {
    ids: BTreeMap<BoardKey, String>,
}

impl RenderTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// `leaderboard<year>` per year, `lifetimeTable` and `heatmap`.
    pub fn conventional(years: &[i32]) -> Self {
        let mut targets = Self::new();
        for &year in years {
            targets.insert(BoardKey::Year(year), format!("leaderboard{year}"));
        }
        targets.insert(BoardKey::Lifetime, "lifetimeTable");
        targets.insert(BoardKey::Heatmap, "heatmap");
        targets
    }

    pub fn insert(&mut self, key: BoardKey, id: impl Into<String>) {
        self.ids.insert(key, id.into());
    }

    pub fn target(&self, key: BoardKey) -> Result<&str, ReportError> {
        self.ids
            .get(&key)
            .map(String::as_str)
            .ok_or(ReportError::MissingTarget(key))
    }
}

pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Element-id-safe form of a participant name.
pub fn compact_id(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Narrow layouts label rows by the last word of the name only.
pub fn short_name(name: &str) -> &str {
    name.split_whitespace().next_back().unwrap_or(name)
}

pub fn format_px(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
