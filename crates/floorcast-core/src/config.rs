// Configuration loading and parsing (league.toml, strategy.toml, draft.toml).

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::constraints::{ConstraintSet, PositionBounds};
use crate::draft::board::{BoardError, DraftBoard, DraftOrder, OrderStyle};
use crate::draft::pick::{PlayerId, Position, TeamId};
use crate::solver::SolveBudget;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub strategy: StrategyConfig,
    pub draft: DraftConfig,
    pub data_paths: DataPaths,
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub num_teams: usize,
    /// Players per completed roster; also the number of draft rounds.
    pub roster_size: usize,
    /// `ppr` or `half_ppr`; selects the projections file.
    pub scoring: String,
    /// Position label (`QB`, `RB`, `D/ST`, ...) to inclusive count bounds.
    pub positions: BTreeMap<String, PositionBounds>,
}

const SCORING_FORMATS: [&str; 2] = ["ppr", "half_ppr"];

const LEAGUE_FILE: &str = "league.toml";
const STRATEGY_FILE: &str = "strategy.toml";
const DRAFT_FILE: &str = "draft.toml";

// ---------------------------------------------------------------------------
// strategy.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    solver: SolverConfig,
    pool: PoolConfig,
    #[serde(default)]
    logging: LoggingConfig,
    data_paths: DataPaths,
}

/// The public strategy config assembled from the strategy.toml sections.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    pub solver: SolverConfig,
    pub pool: PoolConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    pub time_limit_secs: f64,
    #[serde(default)]
    pub mip_rel_gap: f64,
    #[serde(default = "default_integrality_tolerance")]
    pub integrality_tolerance: f64,
}

fn default_integrality_tolerance() -> f64 {
    crate::optimize::engine::DEFAULT_INTEGRALITY_TOLERANCE
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Players projected at or below this many season points are dropped
    /// from consideration (unless already drafted).
    pub min_season_points: f64,
    pub best_available_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it.
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Longest solve a config may ask for: one day.
const MAX_TIME_LIMIT_SECS: f64 = 86_400.0;

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Directory holding `players_<scoring>.csv`.
    pub players_dir: String,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    #[serde(default)]
    draft: DraftConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftConfig {
    #[serde(default)]
    pub order_style: OrderStyle,
    /// Explicit zero-based team index per overall pick. Overrides
    /// `order_style` when present.
    #[serde(default)]
    pub order: Option<Vec<usize>>,
    /// Drafted player ids, in pick order.
    #[serde(default)]
    pub picks: Vec<u32>,
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

impl Config {
    /// Roster rules from `[league]` and `[league.positions]`.
    ///
    /// Labels that do not name a position are skipped here; `validate`
    /// rejects them at load time.
    pub fn constraint_set(&self) -> ConstraintSet {
        let bounds = self
            .league
            .positions
            .iter()
            .filter_map(|(label, b)| Position::from_str_pos(label).map(|p| (p, *b)))
            .collect();
        ConstraintSet::new(self.league.roster_size, bounds)
    }

    pub fn solve_budget(&self) -> SolveBudget {
        SolveBudget {
            time_limit: Duration::from_secs_f64(self.strategy.solver.time_limit_secs),
            mip_rel_gap: self.strategy.solver.mip_rel_gap,
        }
    }

    /// `{players_dir}/players_{scoring}.csv`, resolved against `base_dir`.
    pub fn players_path(&self) -> PathBuf {
        self.base_dir
            .join(&self.data_paths.players_dir)
            .join(format!("players_{}.csv", self.league.scoring))
    }

    /// The draft order configured in draft.toml, or one generated for
    /// `num_teams` teams over `roster_size` rounds.
    pub fn draft_order(&self) -> DraftOrder {
        match &self.draft.order {
            Some(order) => DraftOrder::explicit(order.iter().copied().map(TeamId).collect()),
            None => DraftOrder::generate(
                self.draft.order_style,
                self.league.num_teams,
                self.league.roster_size,
            ),
        }
    }

    /// Replay the draft.toml pick log onto the configured order.
    pub fn draft_board(&self) -> Result<DraftBoard, BoardError> {
        DraftBoard::new(
            self.league.num_teams,
            self.league.roster_size,
            self.draft_order(),
            self.draft.picks.iter().copied().map(PlayerId).collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = read_file(path)?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load and validate configuration from `config/league.toml`,
/// `config/strategy.toml`, and (optionally) `config/draft.toml`, all
/// relative to `base_dir`.
///
/// Does not copy defaults; `load_config` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_file: LeagueFile = parse_file(&config_dir.join(LEAGUE_FILE))?;

    // --- strategy.toml (required) ---
    let strategy_file: StrategyFile = parse_file(&config_dir.join(STRATEGY_FILE))?;
    let strategy = StrategyConfig {
        solver: strategy_file.solver,
        pool: strategy_file.pool,
        logging: strategy_file.logging,
    };

    // --- draft.toml (optional: an empty draft when absent) ---
    let draft_path = config_dir.join(DRAFT_FILE);
    let draft = if draft_path.exists() {
        parse_file::<DraftFile>(&draft_path)?.draft
    } else {
        DraftConfig::default()
    };

    let config = Config {
        league: league_file.league,
        strategy,
        draft,
        data_paths: strategy_file.data_paths,
        base_dir: base_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Config files floorcast reads, and whether a run can go without them.
const CONFIG_FILES: [(&str, bool); 3] = [
    (LEAGUE_FILE, true),
    (STRATEGY_FILE, true),
    (DRAFT_FILE, false),
];

/// Copy each known config file that is missing from `config/` out of
/// `defaults/`. Returns the files that were copied.
///
/// Other files under `defaults/` are ignored. An existing file in `config/`
/// is never overwritten. Fails when a required file is in neither place.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");
    let mut copied = Vec::new();

    for (name, required) in CONFIG_FILES {
        let target = config_dir.join(name);
        if target.exists() {
            continue;
        }
        let source = defaults_dir.join(name);
        if !source.is_file() {
            if required {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!(
                        "{name} is missing from both config/ and defaults/ in {}; \
                         run from the project root or pass --config-dir",
                        base_dir.display()
                    ),
                });
            }
            continue;
        }
        if copy_new(&source, &target)? {
            debug!("copied {} to {}", source.display(), target.display());
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Copy `source` to `target` unless `target` already exists. Returns whether
/// a copy was made.
fn copy_new(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let copy_err = |what: &str, path: &Path, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to {what} {}: {e}", path.display()),
    };

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| copy_err("create", dir, e))?;
    }
    let content = std::fs::read(source).map_err(|e| copy_err("read", source, e))?;
    match std::fs::OpenOptions::new().write(true).create_new(true).open(target) {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, &content).map_err(|e| copy_err("write", target, e))?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(copy_err("create", target, e)),
    }
}

/// Copy any missing defaults into `base_dir/config`, then load from there.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    // League validations
    let league = &config.league;
    if league.num_teams == 0 {
        return Err(invalid("league.num_teams", "must be greater than 0"));
    }
    if league.roster_size == 0 {
        return Err(invalid("league.roster_size", "must be greater than 0"));
    }
    if !SCORING_FORMATS.contains(&league.scoring.as_str()) {
        return Err(invalid(
            "league.scoring",
            format!("must be one of {SCORING_FORMATS:?}, got {:?}", league.scoring),
        ));
    }

    let mut seen = BTreeSet::new();
    for label in league.positions.keys() {
        let field = format!("league.positions.{label}");
        let Some(position) = Position::from_str_pos(label) else {
            return Err(invalid(&field, "not a recognized position"));
        };
        if !seen.insert(position) {
            return Err(invalid(&field, format!("{position} is configured more than once")));
        }
    }
    config
        .constraint_set()
        .validate()
        .map_err(|e| invalid("league.positions", e.to_string()))?;

    // Solver validations
    let solver = &config.strategy.solver;
    if !(solver.time_limit_secs > 0.0 && solver.time_limit_secs <= MAX_TIME_LIMIT_SECS) {
        return Err(invalid(
            "solver.time_limit_secs",
            format!(
                "must be in (0, {MAX_TIME_LIMIT_SECS}], got {}",
                solver.time_limit_secs
            ),
        ));
    }
    if !(0.0..1.0).contains(&solver.mip_rel_gap) {
        return Err(invalid(
            "solver.mip_rel_gap",
            format!("must be in [0, 1), got {}", solver.mip_rel_gap),
        ));
    }
    let tol = solver.integrality_tolerance;
    if !(tol > 0.0 && tol < 0.5) {
        return Err(invalid(
            "solver.integrality_tolerance",
            format!("must be in (0, 0.5), got {tol}"),
        ));
    }

    // Pool validations
    let pool = &config.strategy.pool;
    if !pool.min_season_points.is_finite() {
        return Err(invalid("pool.min_season_points", "must be a finite number"));
    }
    if pool.best_available_limit == 0 {
        return Err(invalid("pool.best_available_limit", "must be > 0"));
    }

    // Logging validations
    let logging = &config.strategy.logging;
    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!("must be one of {LOG_FORMATS:?}, got {:?}", logging.format),
        ));
    }

    // Draft validations
    if let Some(order) = &config.draft.order {
        if let Some((overall, team)) = order
            .iter()
            .enumerate()
            .find(|(_, t)| **t >= league.num_teams)
        {
            return Err(invalid(
                "draft.order",
                format!(
                    "entry {overall} names team index {team}, but there are only {} teams",
                    league.num_teams
                ),
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// The workspace root, located from this crate's manifest directory.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .ancestors()
            .find(|dir| dir.join("defaults").join("league.toml").exists())
            .map(Path::to_path_buf)
            .expect("cannot locate defaults/ above the crate directory")
    }

    /// A fresh temp base dir with the default league and strategy files.
    fn temp_base(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), config_dir.join("league.toml")).unwrap();
        fs::copy(root.join("defaults/strategy.toml"), config_dir.join("strategy.toml")).unwrap();
        tmp
    }

    fn replace_in(tmp: &Path, file: &str, from: &str, to: &str) {
        let path = tmp.join("config").join(file);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(from), "{file} does not contain {from:?}");
        fs::write(&path, text.replace(from, to)).unwrap();
    }

    fn expect_field(tmp: &Path, expected: &str) {
        let err = load_config_from(tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(tmp);
    }

    #[test]
    fn load_valid_config_from_defaults() {
        let tmp = temp_base("floorcast_config_defaults");
        fs::copy(project_root().join("defaults/draft.toml"), tmp.join("config/draft.toml")).unwrap();
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.league.num_teams, 12);
        assert_eq!(config.league.roster_size, 16);
        assert_eq!(config.league.scoring, "ppr");
        assert_eq!(config.league.positions.len(), 6);

        let constraints = config.constraint_set();
        assert_eq!(constraints.roster_size, 16);
        assert_eq!(
            constraints.bounds(Position::Defense),
            Some(PositionBounds::new(1, 1))
        );
        assert_eq!(
            constraints.bounds(Position::RunningBack),
            Some(PositionBounds::new(2, 6))
        );

        let budget = config.solve_budget();
        assert_eq!(budget.time_limit, Duration::from_secs(10));
        assert_eq!(budget.mip_rel_gap, 0.0);
        assert!((config.strategy.solver.integrality_tolerance - 1e-5).abs() < 1e-12);

        assert_eq!(config.strategy.pool.best_available_limit, 15);
        assert_eq!(config.strategy.logging.format, "pretty");
        assert_eq!(
            config.players_path(),
            tmp.join("data/projections").join("players_ppr.csv")
        );

        assert_eq!(config.draft.order_style, OrderStyle::Snake);
        assert!(config.draft.picks.is_empty());
        let board = config.draft_board().unwrap();
        assert_eq!(board.total_picks(), 12 * 16);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_draft_toml_is_empty_draft() {
        let tmp = temp_base("floorcast_config_no_draft");
        let config = load_config_from(&tmp).expect("should load without draft.toml");
        assert!(config.draft.picks.is_empty());
        assert!(config.draft.order.is_none());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn draft_toml_with_picks_and_explicit_order() {
        let tmp = temp_base("floorcast_config_draft_order");
        replace_in(&tmp, "league.toml", "num_teams = 12", "num_teams = 2");
        replace_in(&tmp, "league.toml", "roster_size = 16", "roster_size = 8");
        let order: Vec<String> = (0..16).map(|i| (i % 2).to_string()).collect();
        fs::write(
            tmp.join("config/draft.toml"),
            format!(
                "[draft]\norder_style = \"linear\"\norder = [{}]\npicks = [101, 202, 303]\n",
                order.join(", ")
            ),
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        let board = config.draft_board().unwrap();
        assert_eq!(board.pick_count(), 3);
        assert_eq!(board.state().owner_of(PlayerId(303)), Some(TeamId(0)));
        assert_eq!(board.on_the_clock().map(|c| c.team), Some(TeamId(1)));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_num_teams_zero() {
        let tmp = temp_base("floorcast_config_num_teams_zero");
        replace_in(&tmp, "league.toml", "num_teams = 12", "num_teams = 0");
        expect_field(&tmp, "league.num_teams");
    }

    #[test]
    fn rejects_roster_size_zero() {
        let tmp = temp_base("floorcast_config_roster_zero");
        replace_in(&tmp, "league.toml", "roster_size = 16", "roster_size = 0");
        expect_field(&tmp, "league.roster_size");
    }

    #[test]
    fn rejects_unknown_scoring() {
        let tmp = temp_base("floorcast_config_scoring");
        replace_in(&tmp, "league.toml", "scoring = \"ppr\"", "scoring = \"standard\"");
        expect_field(&tmp, "league.scoring");
    }

    #[test]
    fn rejects_unknown_position_label() {
        let tmp = temp_base("floorcast_config_bad_position");
        replace_in(&tmp, "league.toml", "K   =", "LB  =");
        expect_field(&tmp, "league.positions.LB");
    }

    #[test]
    fn rejects_position_listed_twice() {
        let tmp = temp_base("floorcast_config_dup_position");
        replace_in(&tmp, "league.toml", "K   =", "PK  =");
        let path = tmp.join("config/league.toml");
        let mut text = fs::read_to_string(&path).unwrap();
        text.push_str("K = { min = 1, max = 1 }\n");
        fs::write(&path, text).unwrap();
        expect_field(&tmp, "league.positions.PK");
    }

    #[test]
    fn rejects_unsatisfiable_position_bounds() {
        let tmp = temp_base("floorcast_config_bounds");
        replace_in(&tmp, "league.toml", "roster_size = 16", "roster_size = 30");
        expect_field(&tmp, "league.positions");
    }

    #[test]
    fn rejects_non_positive_time_limit() {
        let tmp = temp_base("floorcast_config_time_limit");
        replace_in(&tmp, "strategy.toml", "time_limit_secs = 10.0", "time_limit_secs = 0.0");
        expect_field(&tmp, "solver.time_limit_secs");
    }

    #[test]
    fn rejects_huge_time_limit() {
        let tmp = temp_base("floorcast_config_huge_time_limit");
        replace_in(&tmp, "strategy.toml", "time_limit_secs = 10.0", "time_limit_secs = 1e300");
        expect_field(&tmp, "solver.time_limit_secs");
    }

    #[test]
    fn day_long_time_limit_is_accepted() {
        let tmp = temp_base("floorcast_config_day_time_limit");
        replace_in(&tmp, "strategy.toml", "time_limit_secs = 10.0", "time_limit_secs = 86400.0");
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.solve_budget().time_limit, Duration::from_secs(86_400));
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_gap_out_of_range() {
        let tmp = temp_base("floorcast_config_gap");
        replace_in(&tmp, "strategy.toml", "mip_rel_gap = 0.0", "mip_rel_gap = 1.5");
        expect_field(&tmp, "solver.mip_rel_gap");
    }

    #[test]
    fn rejects_tolerance_out_of_range() {
        let tmp = temp_base("floorcast_config_tolerance");
        replace_in(
            &tmp,
            "strategy.toml",
            "integrality_tolerance = 1e-5",
            "integrality_tolerance = 0.5",
        );
        expect_field(&tmp, "solver.integrality_tolerance");
    }

    #[test]
    fn rejects_zero_best_available_limit() {
        let tmp = temp_base("floorcast_config_limit");
        replace_in(&tmp, "strategy.toml", "best_available_limit = 15", "best_available_limit = 0");
        expect_field(&tmp, "pool.best_available_limit");
    }

    #[test]
    fn rejects_unknown_log_format() {
        let tmp = temp_base("floorcast_config_log_format");
        replace_in(&tmp, "strategy.toml", "format = \"pretty\"", "format = \"xml\"");
        expect_field(&tmp, "logging.format");
    }

    #[test]
    fn rejects_order_team_out_of_range() {
        let tmp = temp_base("floorcast_config_order_range");
        fs::write(tmp.join("config/draft.toml"), "[draft]\norder = [0, 1, 12]\n").unwrap();
        expect_field(&tmp, "draft.order");
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = temp_base("floorcast_config_missing_league");
        fs::remove_file(tmp.join("config/league.toml")).unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_names_file() {
        let tmp = temp_base("floorcast_config_parse_error");
        fs::write(tmp.join("config/strategy.toml"), "[solver\n").unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("strategy.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_only() {
        let tmp = std::env::temp_dir().join("floorcast_config_ensure");
        let _ = fs::remove_dir_all(&tmp);
        let defaults = tmp.join("defaults");
        fs::create_dir_all(&defaults).unwrap();
        fs::write(defaults.join("league.toml"), "default league").unwrap();
        fs::write(defaults.join("strategy.toml"), "default strategy").unwrap();
        fs::write(defaults.join("draft.toml.example"), "template").unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/league.toml"), "user league").unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, vec![tmp.join("config/strategy.toml")]);
        assert_eq!(fs::read_to_string(tmp.join("config/league.toml")).unwrap(), "user league");
        assert!(!tmp.join("config/draft.toml.example").exists());

        // Second run copies nothing.
        assert!(ensure_config_files(&tmp).unwrap().is_empty());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_only_known_files() {
        let tmp = std::env::temp_dir().join("floorcast_config_known_files");
        let _ = fs::remove_dir_all(&tmp);
        let defaults = tmp.join("defaults");
        fs::create_dir_all(&defaults).unwrap();
        for name in ["league.toml", "strategy.toml", "draft.toml", "notes.toml"] {
            fs::write(defaults.join(name), name).unwrap();
        }

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(
            copied,
            vec![
                tmp.join("config/league.toml"),
                tmp.join("config/strategy.toml"),
                tmp.join("config/draft.toml"),
            ]
        );
        assert!(!tmp.join("config/notes.toml").exists());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_required_file_is_named() {
        let tmp = std::env::temp_dir().join("floorcast_config_missing_strategy");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/league.toml"), "default league").unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => assert!(message.contains("strategy.toml"), "{message}"),
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_needs_defaults_or_config() {
        let tmp = std::env::temp_dir().join("floorcast_config_no_dirs");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let err = ensure_config_files(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }
}
