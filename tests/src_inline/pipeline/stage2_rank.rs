use super::*;

fn ranks(scores: &[u32]) -> Vec<u32> {
    rank_descending(scores.iter().enumerate().map(|(i, &s)| (i, s)))
        .into_iter()
        .map(|r| r.rank)
        .collect()
}

fn record(name: &str, count: u32) -> ParticipationRecord {
    ParticipationRecord {
        name: name.to_string(),
        year: 2024,
        count,
        distance: None,
    }
}

#[test]
fn test_tie_group_skips_ranks() {
    assert_eq!(ranks(&[50, 50, 30]), vec![1, 1, 3]);
    assert_eq!(ranks(&[50, 40, 40, 40, 10]), vec![1, 2, 2, 2, 5]);
}

#[test]
fn test_unsorted_input_is_sorted_descending() {
    let ranked = rank_descending(vec![("c", 10u32), ("a", 50), ("b", 40)]);
    let keys: Vec<&str> = ranked.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_single_all_tied_and_empty() {
    assert_eq!(ranks(&[7]), vec![1]);
    assert_eq!(ranks(&[4, 4, 4, 4]), vec![1, 1, 1, 1]);
    assert!(ranks(&[]).is_empty());
}

#[test]
fn test_zero_scores_rank_after_positive() {
    assert_eq!(ranks(&[0, 3, 0]), vec![1, 2, 2]);
}

#[test]
fn test_tie_sizes_reported_per_group() {
    let ranked = rank_descending(vec![("a", 50u32), ("b", 40), ("c", 40), ("d", 40), ("e", 10)]);
    let sizes: Vec<u32> = ranked.iter().map(|r| r.tie_size).collect();
    assert_eq!(sizes, vec![1, 3, 3, 3, 1]);
}

#[test]
fn test_equal_scores_keep_input_order() {
    let ranked = rank_descending(vec![("first", 5u32), ("second", 5), ("third", 5)]);
    let keys: Vec<&str> = ranked.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["first", "second", "third"]);
}

#[test]
fn test_rank_equal_iff_score_equal() {
    let scores = [9u32, 3, 9, 1, 3, 3, 12, 0, 1];
    let ranked = rank_descending(scores.iter().enumerate().map(|(i, &s)| (i, s)));
    for w in ranked.windows(2) {
        assert!(w[0].score >= w[1].score);
        assert!(w[0].rank <= w[1].rank);
    }
    for a in &ranked {
        for b in &ranked {
            assert_eq!(a.rank == b.rank, a.score == b.score);
        }
        let ahead = ranked.iter().filter(|o| o.score > a.score).count() as u32;
        assert_eq!(a.rank, ahead + 1);
    }
}

#[test]
fn test_rank_state_advances_by_group_size() {
    let mut state = RankState::new();
    assert_eq!(state.advance(10u32), 1);
    assert_eq!(state.advance(10), 1);
    assert_eq!(state.advance(10), 1);
    assert_eq!(state.advance(8), 4);
    assert_eq!(state.advance(2), 5);
}

#[test]
fn test_rank_year_keeps_record_fields() {
    let mut records = vec![record("Ann", 4), record("Bo", 9), record("Cy", 4)];
    records[0].distance = Some(3.1);
    let board = rank_year(2024, &records);
    assert_eq!(board.year, 2024);
    assert_eq!(board.entries[0].name, "Bo");
    assert_eq!(board.entries[1].name, "Ann");
    assert_eq!(board.entries[1].distance, Some(3.1));
    assert_eq!(board.entries[1].rank, 2);
    assert_eq!(board.entries[2].rank, 2);
    assert_eq!(board.entries[2].tie_size, 2);
    assert_eq!(board.count_range(), Some((4, 9)));
}

#[test]
fn test_run_stage2_one_board_per_year() {
    let years = vec![
        YearRecords {
            year: 2022,
            records: vec![record("A", 1)],
        },
        YearRecords {
            year: 2023,
            records: vec![],
        },
    ];
    let boards = run_stage2(&years);
    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0].entries[0].rank, 1);
    assert!(boards[1].entries.is_empty());
    assert_eq!(boards[1].count_range(), None);
}
