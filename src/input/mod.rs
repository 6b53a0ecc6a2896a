use std::path::{Path, PathBuf};

pub mod heatmap;
pub mod records;
pub mod source;

pub use heatmap::{HeatmapTable, load_heatmap_table};
pub use records::load_year_records;

pub const DEFAULT_HEATMAP_FILE: &str = "heatmapData.csv";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error in {path} (line {line}): {msg}")]
    Parse {
        path: PathBuf,
        line: u64,
        msg: String,
    },
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl InputError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        InputError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, line: u64, msg: impl Into<String>) -> Self {
        InputError::Parse {
            path: path.to_path_buf(),
            line,
            msg: msg.into(),
        }
    }
}

/// One contest year and the file its records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSource {
    pub year: i32,
    pub path: PathBuf,
}

pub fn resolve_year_sources(data_dir: &Path, years: &[i32]) -> Result<Vec<YearSource>, InputError> {
    if years.is_empty() {
        return discover_years(data_dir);
    }
    let mut requested = years.to_vec();
    requested.sort_unstable();
    requested.dedup();
    if requested.len() != years.len() {
        tracing::warn!(
            "ignoring {} repeated year(s) in the requested list",
            years.len() - requested.len()
        );
    }
    let mut out = Vec::with_capacity(requested.len());
    for year in requested {
        let path = find_year_path(data_dir, year).ok_or_else(|| {
            InputError::MissingInput(format!(
                "no {year}.csv or {year}.csv.gz in {}",
                data_dir.display()
            ))
        })?;
        out.push(YearSource { year, path });
    }
    Ok(out)
}

pub fn discover_years(data_dir: &Path) -> Result<Vec<YearSource>, InputError> {
    let entries = std::fs::read_dir(data_dir).map_err(|e| InputError::io(data_dir, e))?;
    let mut out: Vec<YearSource> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| InputError::io(data_dir, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(year) = year_from_file_name(name) else {
            continue;
        };
        if out.iter().any(|s| s.year == year) {
            // Prefer the uncompressed file when both exist.
            if name.ends_with(".gz") {
                continue;
            }
            out.retain(|s| s.year != year);
        }
        out.push(YearSource {
            year,
            path: entry.path(),
        });
    }
    if out.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no <year>.csv files found in {}",
            data_dir.display()
        )));
    }
    out.sort_by_key(|s| s.year);
    tracing::info!(
        "discovered {} year file(s) in {}: {:?}",
        out.len(),
        data_dir.display(),
        out.iter().map(|s| s.year).collect::<Vec<_>>()
    );
    Ok(out)
}

fn find_year_path(data_dir: &Path, year: i32) -> Option<PathBuf> {
    [format!("{year}.csv"), format!("{year}.csv.gz")]
        .into_iter()
        .map(|name| data_dir.join(name))
        .find(|p| p.is_file())
}

pub fn year_from_file_name(name: &str) -> Option<i32> {
    let stem = name
        .strip_suffix(".csv.gz")
        .or_else(|| name.strip_suffix(".csv"))?;
    if stem.len() != 4 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
