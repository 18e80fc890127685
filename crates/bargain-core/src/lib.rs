// Library root: player bargain analysis.
//
// Pipeline: parser (lines -> PlayerRecord, metrics derived on construction)
// -> ranker (stable sort by cost per EVP/60) -> report (plain text).

pub mod metrics;
pub mod parser;
pub mod player;
pub mod ranker;
pub mod report;

pub use parser::{load_players, parse_all, parse_line, ParseError};
pub use player::{PlayerRecord, Position, RecordError, SeasonStats};
pub use ranker::{find_best_value, find_most_overpaid, sort_by_cost};
pub use report::{generate_report, write_report, ReportError, DEFAULT_SEASON_LABEL};
