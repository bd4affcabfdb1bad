//! Compiled defaults for the riskmodel engine.

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "RISKMODEL_LOG";

/// Filter used when `RISKMODEL_LOG` is unset or unparseable.
pub const DEFAULT_LOG_FILTER: &str = "riskmodel=info";

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "riskmodel.toml";

// ---- Severity scheme ----

/// Impact magnitudes at which the default scheme changes severity level.
pub const DEFAULT_BREAKPOINTS: [f64; 5] = [0.0, 2.5, 5.0, 7.5, 10.0];

/// Utility assigned to each default level.
pub const DEFAULT_UTILITIES: [f64; 5] = [0.0, -1.0, -3.0, -5.0, -7.0];

/// Labels for each default level.
pub const DEFAULT_LEVEL_NAMES: [&str; 5] =
    ["None", "Negligible", "Moderate", "Critical", "Catastrophic"];

/// Geometric means of the ICD 203 probability bands.
pub const DEFAULT_PROBABILITY_LEVELS: [f64; 7] =
    [0.022, 0.100, 0.300, 0.497, 0.663, 0.87, 0.97];

/// Plain-language ICD 203 probability labels.
pub const DEFAULT_PROBABILITY_NAMES: [&str; 7] = [
    "Remote",
    "Very Unlikely",
    "Unlikely",
    "Roughly Even Chance",
    "Likely",
    "Very Likely",
    "Almost Certain",
];

// ---- Curve fitting ----

/// Levenberg–Marquardt iteration budget.
pub const DEFAULT_FIT_MAX_ITERATIONS: u32 = 500;

/// Relative cost-reduction tolerance.
pub const DEFAULT_FIT_FTOL: f64 = 1e-10;

/// Relative step-size tolerance.
pub const DEFAULT_FIT_XTOL: f64 = 1e-10;

/// Gradient infinity-norm tolerance.
pub const DEFAULT_FIT_GTOL: f64 = 1e-10;

/// RMS residual tolerance, scaled by `max(1, max|y|)`.
pub const DEFAULT_FIT_RESIDUAL_TOL: f64 = 1e-8;

/// Minimum number of points for a 3-parameter logistic fit.
pub const MIN_FIT_POINTS: usize = 3;

// ---- Sampling ----

/// Draws per chain.
pub const DEFAULT_DRAWS: usize = 1000;

/// Independent chains.
pub const DEFAULT_CHAINS: usize = 4;

// ---- Storage ----

/// Default storage root, relative to the working directory.
pub const DEFAULT_STORAGE_ROOT: &str = ".";

/// Default storage backend.
pub const DEFAULT_STORAGE_BACKEND: &str = "csv";

/// SQLite database file name used under the storage root.
pub const SQLITE_FILE_NAME: &str = "riskmodel.db";

/// Index column name for SQLite estimate tables.
pub const RISK_COLUMN: &str = "Risk";
