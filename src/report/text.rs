use crate::pipeline::stage2_rank::YearBoard;
use crate::pipeline::stage3_lifetime::LifetimeBoard;

pub fn render_report_text(title: &str, years: &[YearBoard], lifetime: &LifetimeBoard) -> String {
    let mut out = String::new();

    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count().max(8)));
    out.push_str("\n\n");

    out.push_str("Lifetime leaderboard\n");
    let name_width = name_column_width(lifetime.entries.iter().map(|e| e.name.as_str()));
    out.push_str(&format!(
        "{:>4}  {:<name_width$}  {:>7}  {:>5}\n",
        "Rank", "Name", "Total", "Years"
    ));
    for e in &lifetime.entries {
        out.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>7}  {:>5}\n",
            rank_label(e.rank, e.tie_size),
            e.name,
            e.total,
            e.years_participated
        ));
    }

    for board in years.iter().rev() {
        out.push_str(&format!("\n{}\n", board.year));
        let name_width = name_column_width(board.entries.iter().map(|e| e.name.as_str()));
        out.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>7}\n",
            "Rank", "Name", "Count"
        ));
        for e in &board.entries {
            out.push_str(&format!(
                "{:>4}  {:<name_width$}  {:>7}\n",
                rank_label(e.rank, e.tie_size),
                e.name,
                e.count
            ));
        }
    }

    out
}

/// Tied ranks are written `T3`.
fn rank_label(rank: u32, tie_size: u32) -> String {
    if tie_size > 1 {
        format!("T{rank}")
    } else {
        rank.to_string()
    }
}

fn name_column_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max(4)
}
