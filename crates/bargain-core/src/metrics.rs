// Derived per-player metrics: total ice time, points per 60, cost per point per 60.

use thiserror::Error;

/// Minutes in the normalisation window used by the per-60 rates.
pub const MINUTES_PER_60: f64 = 60.0;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("invalid time on ice '{input}': expected mm:ss with non-negative integer parts")]
    Format { input: String },

    #[error("cannot compute {metric}: {divisor} is zero")]
    DivisionByZero {
        metric: &'static str,
        divisor: &'static str,
    },

    #[error("{metric} is out of range ({value})")]
    NonFinite { metric: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a non-empty run of ASCII digits. Rejects signs and whitespace, which
/// `u32::from_str` would otherwise accept (`+5`).
fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn checked_div(
    numerator: f64,
    divisor: f64,
    metric: &'static str,
    divisor_name: &'static str,
) -> Result<f64, MetricError> {
    if divisor == 0.0 {
        return Err(MetricError::DivisionByZero {
            metric,
            divisor: divisor_name,
        });
    }
    finite(metric, numerator / divisor)
}

/// Reject overflowed (infinite) or NaN intermediate results.
fn finite(metric: &'static str, value: f64) -> Result<f64, MetricError> {
    if value.is_finite() {
        return Ok(value);
    }
    Err(MetricError::NonFinite {
        metric,
        value: value.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an `mm:ss` time string into decimal minutes.
///
/// Seconds are not range-checked: `"10:75"` yields `11.25`.
pub fn parse_time_to_minutes(text: &str) -> Result<f64, MetricError> {
    let format_err = || MetricError::Format {
        input: text.to_string(),
    };

    let (minutes, seconds) = text.split_once(':').ok_or_else(format_err)?;
    let minutes = parse_digits(minutes).ok_or_else(format_err)?;
    let seconds = parse_digits(seconds).ok_or_else(format_err)?;

    Ok(f64::from(minutes) + f64::from(seconds) / 60.0)
}

/// Season ice time in minutes: `avg_minutes * games_played`.
pub fn total_ice_time(avg_minutes: f64, games_played: u32) -> f64 {
    avg_minutes * f64::from(games_played)
}

/// Even-strength points per 60 minutes: `(points / total_ice_time) * 60`.
pub fn production_per_60(points: u32, total_ice_time: f64) -> Result<f64, MetricError> {
    let rate = checked_div(
        f64::from(points),
        total_ice_time,
        "production per 60",
        "total time on ice",
    )?;
    finite("production per 60", rate * MINUTES_PER_60)
}

/// Cap dollars paid per point-per-60:
/// `((cap_hit / total_ice_time) * 60) / production_per_60`.
///
/// Both divisors are checked independently, and every intermediate must stay
/// finite: huge cap hits over tiny ice times overflow to infinity.
pub fn cost_per_production_per_60(
    cap_hit: f64,
    total_ice_time: f64,
    production_per_60: f64,
) -> Result<f64, MetricError> {
    const METRIC: &str = "cost per production per 60";
    let cap_per_minute = checked_div(cap_hit, total_ice_time, METRIC, "total time on ice")?;
    let cost_per_60 = finite(METRIC, cap_per_minute * MINUTES_PER_60)?;
    checked_div(cost_per_60, production_per_60, METRIC, "production per 60")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
