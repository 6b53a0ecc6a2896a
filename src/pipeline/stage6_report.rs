use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::profile::SiteProfile;
use crate::pipeline::stage2_rank::YearBoard;
use crate::pipeline::stage3_lifetime::LifetimeBoard;
use crate::pipeline::stage4_heatmap::HeatmapLayout;
use crate::pipeline::stage5_color::Stage5Output;
use crate::report::html::{PageContext, render_page};
use crate::report::json::{build_summary, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{RenderTargets, ReportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ReportFormat {
    Html,
    Json,
    Text,
}

impl ReportFormat {
    pub fn all() -> Vec<ReportFormat> {
        vec![ReportFormat::Html, ReportFormat::Json, ReportFormat::Text]
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Html => "index.html",
            ReportFormat::Json => "summary.json",
            ReportFormat::Text => "report.txt",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stage6Input<'a> {
    pub profile: &'a SiteProfile,
    pub targets: &'a RenderTargets,
    pub year_boards: &'a [YearBoard],
    pub lifetime: &'a LifetimeBoard,
    pub heatmap: Option<&'a HeatmapLayout>,
    pub painted: &'a Stage5Output,
}

/// Renders every requested format before touching the output directory, so a
/// rendering failure leaves nothing half-written.
pub fn write_reports(
    input: &Stage6Input<'_>,
    out_dir: &Path,
    formats: &[ReportFormat],
) -> Result<Vec<PathBuf>, ReportError> {
    let mut rendered = Vec::with_capacity(formats.len());
    for &format in formats {
        if rendered.iter().any(|(f, _)| *f == format) {
            continue;
        }
        let body = render_format(input, format)?;
        rendered.push((format, body));
    }

    fs::create_dir_all(out_dir).map_err(|e| io_error(out_dir, e))?;
    let mut written = Vec::with_capacity(rendered.len());
    for (format, body) in rendered {
        let path = out_dir.join(format.file_name());
        write_text(&path, &body)?;
        tracing::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn render_format(input: &Stage6Input<'_>, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Html => render_page(&PageContext {
            profile: input.profile,
            targets: input.targets,
            years: &input.painted.years,
            lifetime: &input.painted.lifetime,
            heatmap: input.painted.heatmap.as_ref(),
        }),
        ReportFormat::Json => {
            let summary = build_summary(
                &input.profile.title,
                input.year_boards,
                input.lifetime,
                input.heatmap,
            );
            Ok(render_summary_json(&summary)?)
        }
        ReportFormat::Text => Ok(render_report_text(
            &input.profile.title,
            input.year_boards,
            input.lifetime,
        )),
    }
}

fn write_text(path: &Path, body: &str) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut w = BufWriter::new(file);
    w.write_all(body.as_bytes()).map_err(|e| io_error(path, e))?;
    w.flush().map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
