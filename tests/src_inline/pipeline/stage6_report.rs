use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::model::record::{BoardKey, ParticipationRecord};
use crate::pipeline::stage1_load::{HeatmapSource, Stage1Output, YearRecords};
use crate::pipeline::stage2_rank::run_stage2;
use crate::pipeline::stage3_lifetime::run_stage3;
use crate::pipeline::stage4_heatmap::run_stage4;
use crate::pipeline::stage5_color::run_stage5;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("samosa_board_report_{}_{}", std::process::id(), id));
    dir
}

fn loaded() -> Stage1Output {
    let rec = |name: &str, year: i32, count: u32| ParticipationRecord {
        name: name.to_string(),
        year,
        count,
        distance: None,
    };
    Stage1Output {
        years: vec![
            YearRecords {
                year: 2022,
                records: vec![rec("Ian McLeod", 2022, 9), rec("Ann", 2022, 4)],
            },
            YearRecords {
                year: 2023,
                records: vec![rec("Ann", 2023, 11), rec("Bo", 2023, 11), rec("Ian McLeod", 2023, 1)],
            },
        ],
        heatmap: None,
    }
}

#[test]
fn test_writes_all_formats() {
    let loaded = loaded();
    let profile = SiteProfile::default_v1();
    let boards = run_stage2(&loaded.years);
    let lifetime = run_stage3(loaded.all_records());
    let heatmap = run_stage4(&HeatmapSource::Derived, &loaded);
    let painted = run_stage5(&boards, &lifetime, heatmap.as_ref(), &profile);
    let targets = RenderTargets::conventional(&loaded.year_list());
    let input = Stage6Input {
        profile: &profile,
        targets: &targets,
        year_boards: &boards,
        lifetime: &lifetime,
        heatmap: heatmap.as_ref(),
        painted: &painted,
    };

    let out_dir = make_temp_dir();
    let written = write_reports(&input, &out_dir, &ReportFormat::all()).unwrap();
    assert_eq!(written.len(), 3);

    let html = fs::read_to_string(out_dir.join("index.html")).unwrap();
    assert!(html.contains("<div id=\"heatmap\"><svg"));
    assert!(html.contains("IanMcLeod2022Rect"));

    let json = fs::read_to_string(out_dir.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["lifetime"][0]["name"], "Ann");
    assert_eq!(value["lifetime"][0]["total"], 15);

    let text = fs::read_to_string(out_dir.join("report.txt")).unwrap();
    assert!(text.starts_with("Samosa Stumble\n"));
    assert!(text.contains("T1  Ann"));
    assert!(text.contains("T1  Bo"));
}

#[test]
fn test_duplicate_formats_written_once() {
    let loaded = loaded();
    let profile = SiteProfile::default_v1();
    let boards = run_stage2(&loaded.years);
    let lifetime = run_stage3(loaded.all_records());
    let painted = run_stage5(&boards, &lifetime, None, &profile);
    let targets = RenderTargets::conventional(&loaded.year_list());
    let input = Stage6Input {
        profile: &profile,
        targets: &targets,
        year_boards: &boards,
        lifetime: &lifetime,
        heatmap: None,
        painted: &painted,
    };
    let out_dir = make_temp_dir();
    let written = write_reports(
        &input,
        &out_dir,
        &[ReportFormat::Text, ReportFormat::Text],
    )
    .unwrap();
    assert_eq!(written, vec![out_dir.join("report.txt")]);
    assert!(!out_dir.join("index.html").exists());
}

#[test]
fn test_render_failure_writes_nothing() {
    let loaded = loaded();
    let profile = SiteProfile::default_v1();
    let boards = run_stage2(&loaded.years);
    let lifetime = run_stage3(loaded.all_records());
    let painted = run_stage5(&boards, &lifetime, None, &profile);
    let targets = RenderTargets::new();
    let input = Stage6Input {
        profile: &profile,
        targets: &targets,
        year_boards: &boards,
        lifetime: &lifetime,
        heatmap: None,
        painted: &painted,
    };
    let out_dir = make_temp_dir();
    let err = write_reports(&input, &out_dir, &ReportFormat::all()).unwrap_err();
    assert!(matches!(err, ReportError::MissingTarget(BoardKey::Lifetime)));
    assert!(!out_dir.exists());
}
