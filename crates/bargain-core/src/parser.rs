// Player record parsing.
//
// Input is headerless, one player per line, seven comma-separated fields:
// name,team,position,games_played,avg_toi(mm:ss),ev_points,cap_hit
// There is no quoting; embedded commas are not supported.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics;
use crate::player::{PlayerRecord, Position, RecordError, SeasonStats};

/// Number of fields every input line must carry.
pub const FIELD_COUNT: usize = 7;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read player records: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed record on line {line}: {source}")]
    Record { line: u64, source: RecordError },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn reader_for<R: Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(rdr)
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, RecordError> {
    value.parse().map_err(|e: std::num::ParseIntError| RecordError::InvalidField {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_dollars(field: &'static str, value: &str) -> Result<f64, RecordError> {
    value.parse().map_err(|e: std::num::ParseFloatError| RecordError::InvalidField {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// A line holding only whitespace trims down to a single empty field.
fn is_blank(fields: &StringRecord) -> bool {
    fields.iter().all(str::is_empty)
}

fn record_from_fields(fields: &StringRecord) -> Result<PlayerRecord, RecordError> {
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let name = &fields[0];
    let team = &fields[1];
    let code = &fields[2];
    let games_played = parse_count("games played", &fields[3])?;
    let avg_toi_minutes = metrics::parse_time_to_minutes(&fields[4])?;
    let ev_points = parse_count("even-strength points", &fields[5])?;
    let cap_hit = parse_dollars("cap hit", &fields[6])?;

    if !Position::is_known_code(code) {
        warn!("player '{name}': unknown position code '{code}', treating as Defenseman");
    }

    PlayerRecord::new(
        name,
        team,
        Position::from_code(code),
        SeasonStats {
            games_played,
            avg_toi_minutes,
            ev_points,
            cap_hit,
        },
    )
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a single input line into a record.
///
/// An empty or whitespace-only line has no fields and is reported as a
/// field-count error.
pub fn parse_line(line: &str) -> Result<PlayerRecord, RecordError> {
    let mut reader = reader_for(line.as_bytes());
    let mut fields = StringRecord::new();
    match reader.read_record(&mut fields) {
        Ok(true) if !is_blank(&fields) => record_from_fields(&fields),
        Ok(_) => Err(RecordError::FieldCount {
            expected: FIELD_COUNT,
            found: 0,
        }),
        Err(e) => Err(RecordError::InvalidField {
            field: "line",
            value: line.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Parse every record from `rdr`, preserving input order.
///
/// Records are read lazily one line at a time; the first bad line aborts the
/// whole parse. Empty and whitespace-only lines are skipped.
pub fn parse_all<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, ParseError> {
    let mut reader = reader_for(rdr);
    let mut players = Vec::new();
    for result in reader.records() {
        let fields = result?;
        if is_blank(&fields) {
            continue;
        }
        let line = fields.position().map_or(0, |p| p.line());
        let player =
            record_from_fields(&fields).map_err(|source| ParseError::Record { line, source })?;
        debug!(
            "parsed '{}' ({}): cost per EVP/60 {:.2}",
            player.name(),
            player.position(),
            player.cost_per_production_per_60()
        );
        players.push(player);
    }
    Ok(players)
}

/// Load all player records from a file on disk.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, ParseError> {
    let file = std::fs::File::open(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_all(file)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
