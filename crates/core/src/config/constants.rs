//! Constants for binder

/// PokeAPI v2 base URL
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// TCGdex v2 base URL, language segment is appended per request
pub const TCGDEX_BASE_URL: &str = "https://api.tcgdex.net/v2";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("binder/", env!("CARGO_PKG_VERSION"));

/// Languages the sections format carries
pub const LANGUAGES: &[&str] = &["en", "de", "fr", "es", "it", "ja"];

/// Language used when a value is missing for the requested one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Minimum delay between two requests to the same API
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 100;

pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound accepted for `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of species requested when building the name index
pub const DEFAULT_INDEX_LIMIT: u64 = 2000;

/// Binder page grid
pub const DEFAULT_COLUMNS: u64 = 3;
pub const DEFAULT_ROWS: u64 = 3;
/// Largest accepted column or row count
pub const MAX_GRID_SIZE: u64 = 10;

/// Log directory used when none is given on the command line
pub const LOG_DIR: &str = "logs";
