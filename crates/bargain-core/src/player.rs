// Player records with derived bargain metrics.

use std::fmt;

use thiserror::Error;

use crate::metrics::{self, MetricError};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why a single input line could not become a `PlayerRecord`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("player name is empty")]
    EmptyName,

    #[error(transparent)]
    Metric(#[from] MetricError),
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Skater position. A pure label: no behaviour depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Center,
    LeftWing,
    RightWing,
    Defenseman,
}

impl Position {
    /// Map a roster position code to a position.
    ///
    /// `C`, `L` and `R` are matched exactly; every other code, including `D`
    /// and the empty string, falls through to `Defenseman`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "C" => Position::Center,
            "L" => Position::LeftWing,
            "R" => Position::RightWing,
            _ => Position::Defenseman,
        }
    }

    /// True for the four codes the input format defines.
    pub fn is_known_code(code: &str) -> bool {
        matches!(code, "C" | "L" | "R" | "D")
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Center => "Center",
            Position::LeftWing => "Left Wing",
            Position::RightWing => "Right Wing",
            Position::Defenseman => "Defenseman",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Player record
// ---------------------------------------------------------------------------

/// Raw season inputs the derived metrics are computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonStats {
    pub games_played: u32,
    /// Average time on ice per game, in decimal minutes.
    pub avg_toi_minutes: f64,
    pub ev_points: u32,
    /// Average annual contract value in dollars.
    pub cap_hit: f64,
}

/// One player's season line plus the metrics derived from it.
///
/// Fields are private so a record cannot drift from its derived values once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    name: String,
    team: String,
    position: Position,
    stats: SeasonStats,
    total_toi: f64,
    production_per_60: f64,
    cost_per_production_per_60: f64,
}

impl PlayerRecord {
    /// Build a record and compute its derived metrics.
    ///
    /// Fails when the name is empty, when TOI or cap hit is negative or not
    /// finite, or when a derived metric would divide by zero (zero games,
    /// zero average TOI, or zero even-strength points).
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        position: Position,
        stats: SeasonStats,
    ) -> Result<Self, RecordError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        check_non_negative("average time on ice", stats.avg_toi_minutes)?;
        check_non_negative("cap hit", stats.cap_hit)?;

        let total_toi = metrics::total_ice_time(stats.avg_toi_minutes, stats.games_played);
        let production_per_60 = metrics::production_per_60(stats.ev_points, total_toi)?;
        let cost_per_production_per_60 =
            metrics::cost_per_production_per_60(stats.cap_hit, total_toi, production_per_60)?;

        Ok(Self {
            name,
            team: team.into(),
            position,
            stats,
            total_toi,
            production_per_60,
            cost_per_production_per_60,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn stats(&self) -> &SeasonStats {
        &self.stats
    }

    pub fn games_played(&self) -> u32 {
        self.stats.games_played
    }

    pub fn avg_toi_minutes(&self) -> f64 {
        self.stats.avg_toi_minutes
    }

    pub fn ev_points(&self) -> u32 {
        self.stats.ev_points
    }

    pub fn cap_hit(&self) -> f64 {
        self.stats.cap_hit
    }

    /// Season ice time in minutes.
    pub fn total_toi(&self) -> f64 {
        self.total_toi
    }

    /// Even-strength points per 60 minutes.
    pub fn production_per_60(&self) -> f64 {
        self.production_per_60
    }

    /// Cap dollars per even-strength point per 60. Lower is a better bargain.
    pub fn cost_per_production_per_60(&self) -> f64 {
        self.cost_per_production_per_60
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), RecordError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(RecordError::InvalidField {
        field,
        value: value.to_string(),
        reason: "must be a finite, non-negative number".into(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
