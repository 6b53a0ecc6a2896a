use crate::model::record::{ParticipationRecord, RankedEntry};
use crate::pipeline::stage1_load::YearRecords;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<K, S> {
    pub key: K,
    pub score: S,
    pub rank: u32,
    /// Number of entries sharing this rank.
    pub tie_size: u32,
}

/// Fold state of the ranking scan over a descending score sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankState<S> {
    rank: u32,
    prev: Option<S>,
    tied: u32,
}

impl<S: Ord + Copy> RankState<S> {
    pub fn new() -> Self {
        Self {
            rank: 1,
            prev: None,
            tied: 0,
        }
    }

    /// Feeds the next score (scores must arrive in descending order) and
    /// returns its rank. A drop in score advances the rank by the size of the
    /// tie group that just ended.
    pub fn advance(&mut self, score: S) -> u32 {
        match self.prev {
            Some(prev) if score < prev => {
                self.rank += self.tied;
                self.tied = 1;
            }
            Some(prev) if score == prev => {
                self.tied += 1;
            }
            _ => {
                self.tied = 1;
            }
        }
        self.prev = Some(score);
        self.rank
    }
}

impl<S: Ord + Copy> Default for RankState<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts by score descending (stable) and assigns tie-skip ranks.
pub fn rank_descending<K, S, I>(entries: I) -> Vec<Ranked<K, S>>
where
    S: Ord + Copy,
    I: IntoIterator<Item = (K, S)>,
{
    let mut sorted: Vec<(K, S)> = entries.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let mut ranked: Vec<Ranked<K, S>> = sorted
        .into_iter()
        .scan(RankState::new(), |state, (key, score)| {
            let rank = state.advance(score);
            Some(Ranked {
                key,
                score,
                rank,
                tie_size: 1,
            })
        })
        .collect();

    for group in ranked.chunk_by_mut(|a, b| a.rank == b.rank) {
        let size = group.len() as u32;
        for entry in group {
            entry.tie_size = size;
        }
    }
    ranked
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearBoard {
    pub year: i32,
    pub entries: Vec<RankedEntry>,
}

impl YearBoard {
    pub fn count_range(&self) -> Option<(u32, u32)> {
        let min = self.entries.iter().map(|e| e.count).min()?;
        let max = self.entries.iter().map(|e| e.count).max()?;
        Some((min, max))
    }
}

pub fn rank_year(year: i32, records: &[ParticipationRecord]) -> YearBoard {
    let ranked = rank_descending(records.iter().map(|r| (r, r.count)));
    let entries = ranked
        .into_iter()
        .map(|r| RankedEntry {
            name: r.key.name.clone(),
            count: r.score,
            distance: r.key.distance,
            rank: r.rank,
            tie_size: r.tie_size,
        })
        .collect();
    YearBoard { year, entries }
}

pub fn run_stage2(years: &[YearRecords]) -> Vec<YearBoard> {
    years
        .iter()
        .map(|y| {
            let board = rank_year(y.year, &y.records);
            if let Some(top) = board.entries.first() {
                tracing::debug!(
                    "{}: {} ranked, leader {:?} with {}",
                    y.year,
                    board.entries.len(),
                    top.name,
                    top.count
                );
            }
            board
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_rank.rs"]
mod tests;
