mod config;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigError, apply_target_overrides, load_site_config, validate_viewport};
use crate::input::{DEFAULT_HEATMAP_FILE, InputError, resolve_year_sources};
use crate::model::profile::SiteProfile;
use crate::pipeline::stage1_load::{HeatmapSource, LoadPlan, run_stage1};
use crate::pipeline::stage2_rank::run_stage2;
use crate::pipeline::stage3_lifetime::run_stage3;
use crate::pipeline::stage4_heatmap::run_stage4;
use crate::pipeline::stage5_color::run_stage5;
use crate::pipeline::stage6_report::{ReportFormat, Stage6Input, write_reports};
use crate::report::{RenderTargets, ReportError};

#[derive(Debug, Parser)]
#[command(name = "samosa-board", version, about = "Build a static contest leaderboard from yearly CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the yearly files, rank them and write the site.
    Build(BuildArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Directory holding `<year>.csv` files.
    #[arg(long)]
    data: PathBuf,
    /// Output directory.
    #[arg(long)]
    out: PathBuf,
    /// Years to load; discovered from the data directory when omitted.
    #[arg(long, value_delimiter = ',')]
    years: Vec<i32>,
    /// Precomputed wide-format heatmap file (default: <data>/heatmapData.csv).
    #[arg(long, conflicts_with_all = ["derive_heatmap", "no_heatmap"])]
    heatmap: Option<PathBuf>,
    /// Build the heatmap from the yearly records instead of a file.
    #[arg(long, conflicts_with = "no_heatmap")]
    derive_heatmap: bool,
    #[arg(long)]
    no_heatmap: bool,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    viewport_width: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    viewport_height: Option<u32>,
    #[arg(long)]
    title: Option<String>,
    /// JSON site configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Outputs to write (default: all).
    #[arg(long, value_enum, value_delimiter = ',')]
    format: Vec<ReportFormat>,
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    let cli = Cli::parse();
    let Command::Build(args) = cli.command;
    logging::init(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct RunConfig {
    data_dir: PathBuf,
    out_dir: PathBuf,
    years: Vec<i32>,
    heatmap: HeatmapSource,
    profile: SiteProfile,
    target_overrides: BTreeMap<String, String>,
    formats: Vec<ReportFormat>,
}

fn resolve_run_config(args: &BuildArgs) -> Result<RunConfig, ConfigError> {
    let file = match &args.config {
        Some(path) => load_site_config(path)?,
        None => Default::default(),
    };

    let mut profile = SiteProfile::default_v1();
    file.apply_to(&mut profile)?;
    if let Some(title) = &args.title {
        profile.title = title.clone();
    }
    if let Some(width) = args.viewport_width {
        profile.viewport.width = width;
    }
    if let Some(height) = args.viewport_height {
        profile.viewport.height = height;
    }
    validate_viewport(profile.viewport)?;

    let years = if !args.years.is_empty() {
        args.years.clone()
    } else {
        file.years.clone().unwrap_or_default()
    };

    Ok(RunConfig {
        data_dir: args.data.clone(),
        out_dir: args.out.clone(),
        years,
        heatmap: resolve_heatmap_source(args),
        profile,
        target_overrides: file.targets,
        formats: if args.format.is_empty() {
            ReportFormat::all()
        } else {
            args.format.clone()
        },
    })
}

fn resolve_heatmap_source(args: &BuildArgs) -> HeatmapSource {
    if args.no_heatmap {
        HeatmapSource::Disabled
    } else if args.derive_heatmap {
        HeatmapSource::Derived
    } else {
        HeatmapSource::File(
            args.heatmap
                .clone()
                .unwrap_or_else(|| args.data.join(DEFAULT_HEATMAP_FILE)),
        )
    }
}

fn run(args: &BuildArgs) -> Result<(), AppError> {
    let config = resolve_run_config(args)?;
    tracing::info!(
        "building {:?} from {} into {}",
        config.profile.title,
        config.data_dir.display(),
        config.out_dir.display()
    );

    let plan = LoadPlan {
        years: resolve_year_sources(&config.data_dir, &config.years)?,
        heatmap: config.heatmap.clone(),
    };
    let stage1 = run_stage1(&plan)?;

    let year_boards = run_stage2(&stage1.years);
    let lifetime = run_stage3(stage1.all_records());
    let heatmap = run_stage4(&config.heatmap, &stage1);
    let painted = run_stage5(&year_boards, &lifetime, heatmap.as_ref(), &config.profile);

    let mut targets = RenderTargets::conventional(&stage1.year_list());
    apply_target_overrides(&mut targets, &config.target_overrides)?;

    let written = write_reports(
        &Stage6Input {
            profile: &config.profile,
            targets: &targets,
            year_boards: &year_boards,
            lifetime: &lifetime,
            heatmap: heatmap.as_ref(),
            painted: &painted,
        },
        &config.out_dir,
        &config.formats,
    )?;
    tracing::info!("done: {} file(s) written", written.len());

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
