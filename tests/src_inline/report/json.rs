use super::*;
use crate::pipeline::stage1_load::YearRecords;
use crate::pipeline::stage2_rank::run_stage2;
use crate::pipeline::stage3_lifetime::run_stage3;
use crate::pipeline::stage4_heatmap::{build_layout, derive_wide_table};
use crate::model::record::ParticipationRecord;

fn years() -> Vec<YearRecords> {
    let rec = |name: &str, year: i32, count: u32| ParticipationRecord {
        name: name.to_string(),
        year,
        count,
        distance: Some(2.0),
    };
    vec![
        YearRecords {
            year: 2022,
            records: vec![rec("Ann", 2022, 5), rec("Bo", 2022, 5)],
        },
        YearRecords {
            year: 2023,
            records: vec![rec("Ann", 2023, 7)],
        },
    ]
}

#[test]
fn test_summary_shape() {
    let years = years();
    let boards = run_stage2(&years);
    let lifetime = run_stage3(years.iter().flat_map(|y| y.records.iter()));
    let layout = build_layout(&derive_wide_table(&years));
    let summary = build_summary("Test", &boards, &lifetime, Some(&layout));
    let json = render_summary_json(&summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["tool"], "samosa-board");
    assert_eq!(value["title"], "Test");
    assert_eq!(value["years"][0]["year"], 2022);
    assert_eq!(value["years"][0]["participants"], 2);
    assert_eq!(value["years"][0]["total"], 10);
    assert_eq!(value["years"][0]["leaders"], serde_json::json!(["Ann", "Bo"]));
    assert_eq!(value["years"][0]["entries"][1]["tie_size"], 2);
    assert_eq!(value["lifetime"][0]["name"], "Ann");
    assert_eq!(value["lifetime"][0]["total"], 12);
    assert_eq!(value["lifetime"][0]["years_participated"], 2);
    assert_eq!(value["heatmap"]["years"], serde_json::json!([2022, 2023]));
    assert_eq!(value["heatmap"]["cells"][1]["value"], 7);
}

#[test]
fn test_summary_omits_disabled_heatmap() {
    let years = years();
    let boards = run_stage2(&years);
    let lifetime = run_stage3(years.iter().flat_map(|y| y.records.iter()));
    let summary = build_summary("Test", &boards, &lifetime, None);
    let json = render_summary_json(&summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("heatmap").is_none());
}
