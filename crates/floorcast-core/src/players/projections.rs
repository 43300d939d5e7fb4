// Projection data loading.
//
// Reads a players CSV with one row per player and one column per week:
//
//   id,name,position,pro_team,week1,week2,...,week17
//
// Week columns are found by header name and ordered by week number, so their
// order in the file does not matter. Empty week cells are bye weeks (0.0).

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use super::pool::{Player, PlayerPool, PoolError};
use crate::draft::pick::{PlayerId, Position};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },

    #[error("{path} has no week columns (expected headers like `week1`)")]
    NoWeekColumns { path: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Column indices resolved from the header row.
#[derive(Debug)]
struct Columns {
    id: usize,
    name: usize,
    position: usize,
    pro_team: Option<usize>,
    /// Column index per week, in week order.
    weeks: Vec<usize>,
}

/// Parse a `week<N>` / `week_<N>` header into N.
fn week_number(header: &str) -> Option<u32> {
    let rest = header.strip_prefix("week")?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    rest.parse().ok()
}

fn resolve_columns(headers: &csv::StringRecord, source: &str) -> Result<Columns, ProjectionError> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let find = |column: &'static str| -> Result<usize, ProjectionError> {
        normalized
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ProjectionError::MissingColumn {
                path: source.to_string(),
                column,
            })
    };

    let mut weeks: Vec<(u32, usize)> = normalized
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| week_number(h).map(|n| (n, idx)))
        .collect();
    if weeks.is_empty() {
        return Err(ProjectionError::NoWeekColumns {
            path: source.to_string(),
        });
    }
    weeks.sort_by_key(|(n, _)| *n);

    Ok(Columns {
        id: find("id")?,
        name: find("name")?,
        position: find("position")?,
        pro_team: normalized.iter().position(|h| h == "pro_team"),
        weeks: weeks.into_iter().map(|(_, idx)| idx).collect(),
    })
}

/// Turn one CSV record into a Player, or explain why it was skipped.
fn parse_row(record: &csv::StringRecord, cols: &Columns) -> Result<Player, String> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let id: u32 = field(cols.id)
        .parse()
        .map_err(|_| format!("invalid id '{}'", field(cols.id)))?;
    let name = field(cols.name).to_string();
    let position = Position::from_str_pos(field(cols.position))
        .ok_or_else(|| format!("'{}': unknown position '{}'", name, field(cols.position)))?;
    let pro_team = cols.pro_team.map(|idx| field(idx).to_string()).unwrap_or_default();

    let mut weekly_points = Vec::with_capacity(cols.weeks.len());
    for (week, &idx) in cols.weeks.iter().enumerate() {
        let raw = field(idx);
        let value = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>()
                .map_err(|_| format!("'{}': invalid week {} value '{}'", name, week + 1, raw))?
        };
        if !value.is_finite() || value < 0.0 {
            return Err(format!("'{}': week {} projection {} out of range", name, week + 1, value));
        }
        weekly_points.push(value);
    }

    Ok(Player {
        id: PlayerId(id),
        name,
        pro_team,
        position,
        weekly_points,
    })
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load players from any reader. `source` names the input in errors and logs.
///
/// Malformed rows and repeated ids are skipped with a warning; a file with
/// zero valid rows is an error.
pub fn load_players_from_reader<R: Read>(rdr: R, source: &str) -> Result<Vec<Player>, ProjectionError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader
        .headers()
        .map_err(|e| ProjectionError::Csv {
            path: source.to_string(),
            source: e,
        })?
        .clone();
    let cols = resolve_columns(&headers, source)?;

    let mut players = Vec::new();
    let mut seen: BTreeSet<PlayerId> = BTreeSet::new();
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed row in {}: {}", source, e);
                continue;
            }
        };
        match parse_row(&record, &cols) {
            Ok(player) => {
                if !seen.insert(player.id) {
                    warn!("duplicate player id {} in {}, keeping the first row", player.id, source);
                    continue;
                }
                players.push(player);
            }
            Err(reason) => warn!("skipping player row in {}: {}", source, reason),
        }
    }

    if players.is_empty() {
        return Err(ProjectionError::Validation(format!(
            "{source} produced zero valid player rows"
        )));
    }
    Ok(players)
}

/// Load a player pool from a CSV file.
pub fn load_player_pool(path: &Path) -> Result<PlayerPool, ProjectionError> {
    let file = std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_players_from_reader(file, &path.display().to_string())?;
    let pool = PlayerPool::new(players)?;

    let by_position: BTreeMap<Position, usize> =
        pool.iter().fold(BTreeMap::new(), |mut acc, p| {
            *acc.entry(p.position).or_insert(0) += 1;
            acc
        });
    info!(
        "Loaded {} players over {} weeks from {} ({:?})",
        pool.len(),
        pool.num_periods(),
        path.display(),
        by_position
    );
    Ok(pool)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
