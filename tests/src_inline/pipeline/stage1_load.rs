use super::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("samosa_board_stage1_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = File::create(path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

fn source(dir: &Path, year: i32) -> YearSource {
    YearSource {
        year,
        path: dir.join(format!("{year}.csv")),
    }
}

#[test]
fn test_loads_all_years_in_plan_order() {
    let dir = make_temp_dir();
    write_file(&dir.join("2022.csv"), "name,samosas,miles\nAnn,3,1.0\n");
    write_file(&dir.join("2023.csv"), "name,samosas,miles\nAnn,5,1.0\nBo,2,0.5\n");
    write_file(&dir.join("heatmapData.csv"), "name,2022,2023\nAnn,3,5\nBo,0,2\n");
    let plan = LoadPlan {
        years: vec![source(&dir, 2023), source(&dir, 2022)],
        heatmap: HeatmapSource::File(dir.join("heatmapData.csv")),
    };
    let out = run_stage1(&plan).unwrap();
    assert_eq!(out.year_list(), vec![2023, 2022]);
    assert_eq!(out.years[0].records.len(), 2);
    assert_eq!(out.all_records().count(), 3);
    let heatmap = out.heatmap.unwrap();
    assert_eq!(heatmap.rows.len(), 2);
}

#[test]
fn test_any_failed_load_fails_the_whole_stage() {
    let dir = make_temp_dir();
    write_file(&dir.join("2022.csv"), "name,samosas\nAnn,3\n");
    write_file(&dir.join("2023.csv"), "name,samosas\nAnn,many\n");
    let plan = LoadPlan {
        years: vec![source(&dir, 2022), source(&dir, 2023)],
        heatmap: HeatmapSource::Disabled,
    };
    let err = run_stage1(&plan).unwrap_err();
    assert!(err.to_string().contains("2023.csv"));
}

#[test]
fn test_missing_heatmap_file_fails_the_stage() {
    let dir = make_temp_dir();
    write_file(&dir.join("2022.csv"), "name,samosas\nAnn,3\n");
    let plan = LoadPlan {
        years: vec![source(&dir, 2022)],
        heatmap: HeatmapSource::File(dir.join("heatmapData.csv")),
    };
    assert!(matches!(
        run_stage1(&plan),
        Err(InputError::MissingInput(_))
    ));
}

#[test]
fn test_derived_heatmap_loads_no_file() {
    let dir = make_temp_dir();
    write_file(&dir.join("2022.csv"), "name,samosas\nAnn,3\n");
    let plan = LoadPlan {
        years: vec![source(&dir, 2022)],
        heatmap: HeatmapSource::Derived,
    };
    let out = run_stage1(&plan).unwrap();
    assert!(out.heatmap.is_none());
    assert_eq!(out.years.len(), 1);
}

#[test]
fn test_repeated_requested_year_is_loaded_once() {
    let dir = make_temp_dir();
    write_file(&dir.join("2022.csv"), "name,samosas\nAnn,10\n");
    let plan = LoadPlan {
        years: crate::input::resolve_year_sources(&dir, &[2022, 2022]).unwrap(),
        heatmap: HeatmapSource::Disabled,
    };
    let out = run_stage1(&plan).unwrap();
    assert_eq!(out.year_list(), vec![2022]);
    let board = crate::pipeline::stage3_lifetime::run_stage3(out.all_records());
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].total, 10);
    assert_eq!(board.entries[0].years_participated, 1);
}
