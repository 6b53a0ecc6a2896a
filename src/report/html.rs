use std::fmt::Write;

use crate::model::profile::{SiteProfile, Viewport};
use crate::model::record::BoardKey;
use crate::pipeline::stage5_color::{BoardRow, BoardTable, HeatmapGrid};
use crate::report::svg::render_heatmap_svg;
use crate::report::{ReportError, RenderTargets, html_escape};

const TROPHY: &str = " &#129351;";

const PAGE_CSS: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#312e2b;color:#fff}\
nav{display:flex;flex-wrap:wrap;gap:.5rem;padding:1rem;background:#222}\
nav a{color:#fff;text-decoration:none;padding:.4rem .8rem;border-radius:4px;background:#444}\
section{padding:1rem 2rem}\
table{border-collapse:collapse;width:100%;max-width:720px}\
th,td{padding:.45rem .6rem}\
th{text-align:left}\
.leaderboardRow td:nth-child(2){text-align:left;font-size:18px}\
.num{text-align:right}\
.circle{display:inline-block;min-width:1.8em;text-align:center;border-radius:50%;background:rgba(255,255,255,.15)}\
.axis text{fill:#fff;font-size:13px}\
.heatmapLabel{font-size:12px}";

#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub profile: &'a SiteProfile,
    pub targets: &'a RenderTargets,
    pub years: &'a [BoardTable],
    pub lifetime: &'a BoardTable,
    pub heatmap: Option<&'a HeatmapGrid>,
}

pub fn render_page(ctx: &PageContext<'_>) -> Result<String, ReportError> {
    let title = html_escape(&ctx.profile.title);
    let mut out = String::with_capacity(32 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n<style>{PAGE_CSS}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    out.push_str("<nav>");
    let _ = write!(
        out,
        "<a class=\"tablinks\" href=\"#{}-tab\">Lifetime</a>",
        ctx.targets.target(BoardKey::Lifetime)?
    );
    for table in ctx.years.iter().rev() {
        let _ = write!(
            out,
            "<a class=\"tablinks\" href=\"#{}-tab\">{}</a>",
            ctx.targets.target(table.key)?,
            table.key
        );
    }
    if ctx.heatmap.is_some() {
        let _ = write!(
            out,
            "<a class=\"tablinks\" href=\"#{}-tab\">Heatmap</a>",
            ctx.targets.target(BoardKey::Heatmap)?
        );
    }
    out.push_str("</nav>\n");

    out.push_str(&render_lifetime_section(ctx)?);
    for table in ctx.years.iter().rev() {
        out.push_str(&render_year_section(ctx, table)?);
    }
    if let Some(grid) = ctx.heatmap {
        let id = ctx.targets.target(BoardKey::Heatmap)?;
        let _ = write!(
            out,
            "<section class=\"tabcontent\" id=\"{id}-tab\">\n<h2>{} by year</h2>\n<div id=\"{id}\">{}</div>\n</section>\n",
            html_escape(&ctx.profile.count_label),
            render_heatmap_svg(grid, ctx.profile.viewport, &ctx.profile.count_label)
        );
    }

    out.push_str("</body>\n</html>\n");
    Ok(out)
}

fn render_year_section(ctx: &PageContext<'_>, table: &BoardTable) -> Result<String, ReportError> {
    let id = ctx.targets.target(table.key)?;
    let mut out = String::new();
    let _ = write!(
        out,
        "<section class=\"tabcontent\" id=\"{id}-tab\">\n<h2>{}</h2>\n<table id=\"{id}\">\n\
<tr><th>Rank</th><th>Name</th><th class=\"num\">{}</th></tr>\n",
        table.key,
        html_escape(&ctx.profile.count_label)
    );
    for row in &table.rows {
        out.push_str(&year_row_html(row));
    }
    out.push_str("</table>\n</section>\n");
    Ok(out)
}

pub fn year_row_html(row: &BoardRow) -> String {
    let trophy = if row.is_leader() { TROPHY } else { "" };
    format!(
        "<tr class=\"leaderboardRow\" style=\"background-color:{}\"><td><span class=\"circle\">{}</span></td><td>{}{}</td><td class=\"num\">{}</td></tr>\n",
        row.fill.css(),
        row.rank,
        html_escape(&row.name),
        trophy,
        row.value
    )
}

fn render_lifetime_section(ctx: &PageContext<'_>) -> Result<String, ReportError> {
    let id = ctx.targets.target(BoardKey::Lifetime)?;
    let viewport = ctx.profile.viewport;
    let mut out = String::new();
    let _ = write!(
        out,
        "<section class=\"tabcontent\" id=\"{id}-tab\">\n<h2>Lifetime leaderboard</h2>\n<table id=\"{id}\">\n<tr><th>Rank</th><th>Name</th>"
    );
    if !viewport.is_compact() {
        let _ = write!(
            out,
            "<th class=\"num\">Total {}</th>",
            html_escape(&ctx.profile.count_label)
        );
    }
    out.push_str("<th class=\"num\">Years</th></tr>\n");
    for row in &ctx.lifetime.rows {
        out.push_str(&lifetime_row_html(row, viewport));
    }
    out.push_str("</table>\n</section>\n");
    Ok(out)
}

/// Compact viewports drop the total column and keep only the years count.
pub fn lifetime_row_html(row: &BoardRow, viewport: Viewport) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<tr class=\"leaderboardRow\" style=\"background-color:{}\"><td><span class=\"circle\">{}</span></td><td>{}</td>",
        row.fill.css(),
        row.rank,
        html_escape(&row.name)
    );
    if !viewport.is_compact() {
        let _ = write!(out, "<td class=\"num\">{}</td>", row.value);
    }
    let _ = write!(
        out,
        "<td class=\"num\">{}</td></tr>\n",
        row.years_participated.unwrap_or(0)
    );
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/html.rs"]
mod tests;
