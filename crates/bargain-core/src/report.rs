// Plain-text bargain report.

use std::io::{self, Write};

use thiserror::Error;

use crate::player::PlayerRecord;
use crate::ranker;

/// Season label used when the caller has nothing more specific.
pub const DEFAULT_SEASON_LABEL: &str = "2024-2025";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot build a report from zero player records")]
    EmptyInput,

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Write the report for `records`, in the order given, to `out`.
///
/// Expects `records` already ranked with `ranker::sort_by_cost`: the top
/// bargain is found by a full scan, but the most overpaid player is simply the
/// last record. Nothing is written when `records` is empty.
pub fn write_report<W: Write>(
    out: &mut W,
    season: &str,
    team: &str,
    records: &[PlayerRecord],
) -> Result<(), ReportError> {
    let top_bargain = ranker::find_best_value(records).ok_or(ReportError::EmptyInput)?;
    let most_overpaid = ranker::find_most_overpaid(records).ok_or(ReportError::EmptyInput)?;

    writeln!(out, "{season} Player Bargain Report -- {team}")?;
    writeln!(out)?;

    for p in records {
        writeln!(out, "Name: {}", p.name())?;
        writeln!(out, "Position: {}", p.position())?;
        writeln!(out, "Time on Ice (min): {:.2}", p.total_toi())?;
        writeln!(out, "Even-Strength Points: {}", p.ev_points())?;
        writeln!(out, "Even-Strength Points per 60 mins: {:.2}", p.production_per_60())?;
        writeln!(
            out,
            "Earnings per Even-Strength Point per 60 mins: ${:.2}",
            p.cost_per_production_per_60()
        )?;
        writeln!(out)?;
    }

    writeln!(out, "Top Bargain: {}", top_bargain.name())?;
    writeln!(out, "Most Overpaid: {}", most_overpaid.name())?;
    Ok(())
}

/// Render the report into a `String`.
pub fn generate_report(
    season: &str,
    team: &str,
    records: &[PlayerRecord],
) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    write_report(&mut buf, season, team, records)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
