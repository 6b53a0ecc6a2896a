use std::collections::BTreeMap;

use crate::model::record::{LifetimeSummary, ParticipationRecord};
use crate::pipeline::stage2_rank::rank_descending;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifetimeTally {
    pub total: u64,
    pub years_participated: u32,
}

/// Accumulates one tally per participant name. The result does not depend on
/// record order.
pub fn fold_lifetime<'a, I>(records: I) -> BTreeMap<&'a str, LifetimeTally>
where
    I: IntoIterator<Item = &'a ParticipationRecord>,
{
    let mut tallies: BTreeMap<&'a str, LifetimeTally> = BTreeMap::new();
    for record in records {
        let tally = tallies.entry(record.name.as_str()).or_default();
        tally.total += record.count as u64;
        tally.years_participated += 1;
    }
    tallies
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifetimeBoard {
    pub entries: Vec<LifetimeSummary>,
}

impl LifetimeBoard {
    pub fn total_range(&self) -> Option<(u64, u64)> {
        let min = self.entries.iter().map(|e| e.total).min()?;
        let max = self.entries.iter().map(|e| e.total).max()?;
        Some((min, max))
    }
}

/// Folds all years into lifetime totals and ranks them. Equal totals are
/// listed in name order, not by first appearance in the year files, so
/// `participant_id` does not depend on file order.
pub fn run_stage3<'a, I>(records: I) -> LifetimeBoard
where
    I: IntoIterator<Item = &'a ParticipationRecord>,
{
    let tallies = fold_lifetime(records);
    let ranked = rank_descending(tallies.into_iter().map(|(name, t)| ((name, t), t.total)));

    let entries: Vec<LifetimeSummary> = ranked
        .into_iter()
        .enumerate()
        .map(|(participant_id, r)| {
            let (name, tally) = r.key;
            LifetimeSummary {
                participant_id,
                name: name.to_string(),
                total: tally.total,
                years_participated: tally.years_participated,
                rank: r.rank,
                tie_size: r.tie_size,
            }
        })
        .collect();

    tracing::info!("lifetime board: {} participant(s)", entries.len());
    LifetimeBoard { entries }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_lifetime.rs"]
mod tests;
