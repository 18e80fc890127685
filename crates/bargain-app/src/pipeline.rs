// End-to-end run: load -> rank -> render -> write.
//
// The report is rendered fully in memory before the output path is touched,
// then written through a temp file in the destination directory and renamed
// into place, so a failed run never leaves a partial report behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use bargain_core::{
    find_best_value, find_most_overpaid, generate_report, load_players, sort_by_cost,
    PlayerRecord, ReportError,
};

use crate::config::Config;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records: usize,
    pub team: String,
    pub top_bargain: String,
    pub most_overpaid: String,
    pub output_path: PathBuf,
}

/// Header team label: the configured one, else the first ranked player's team.
fn team_label(config: &Config, ranked: &[PlayerRecord]) -> Result<String, ReportError> {
    if let Some(team) = &config.report.team {
        return Ok(team.clone());
    }
    ranked
        .first()
        .map(|p| p.team().to_string())
        .ok_or(ReportError::EmptyInput)
}

/// Mode for a report file that did not exist before: `rw-r--r--`.
#[cfg(unix)]
const NEW_REPORT_MODE: u32 = 0o644;

/// Permissions the finished report should carry: those of the file it
/// replaces, else the usual mode for a new file. Temp files start at `0600`.
fn report_permissions(path: &Path) -> Option<std::fs::Permissions> {
    if let Ok(meta) = std::fs::metadata(path) {
        return Some(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(std::fs::Permissions::from_mode(NEW_REPORT_MODE))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Replace `path` with `contents` in one rename.
pub fn write_atomically(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.flush())
        .context("failed to write report to temp file")?;
    if let Some(perms) = report_permissions(path) {
        tmp.as_file()
            .set_permissions(perms)
            .context("failed to set report file permissions")?;
    }
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to move report into {}", path.display()))?;
    Ok(())
}

/// Run the whole analysis for `config`.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let input = config.input_path();
    let mut players = load_players(&input)
        .with_context(|| format!("failed to load players from {}", input.display()))?;
    info!("Loaded {} player records from {}", players.len(), input.display());

    sort_by_cost(&mut players);

    let team = team_label(config, &players)?;
    info!("Reporting season {} for team {}", config.report.season, team);

    let report = generate_report(&config.report.season, &team, &players)
        .context("failed to generate report")?;

    // Both lookups succeed once the report rendered.
    let top_bargain = find_best_value(&players).ok_or(ReportError::EmptyInput)?;
    let most_overpaid = find_most_overpaid(&players).ok_or(ReportError::EmptyInput)?;
    info!(
        "Top bargain: {} (${:.2}); most overpaid: {} (${:.2})",
        top_bargain.name(),
        top_bargain.cost_per_production_per_60(),
        most_overpaid.name(),
        most_overpaid.cost_per_production_per_60()
    );

    let output_path = config.output_path();
    write_atomically(&output_path, report.as_bytes())?;
    info!("Wrote report to {}", output_path.display());

    Ok(RunSummary {
        records: players.len(),
        team,
        top_bargain: top_bargain.name().to_string(),
        most_overpaid: most_overpaid.name().to_string(),
        output_path,
    })
}
