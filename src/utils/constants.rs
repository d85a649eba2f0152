/// little_r sentinel values
pub const MISSING_VALUE: f64 = -888888.0;
pub const MISSING_INTEGER: i64 = -888888;

/// Quality control code written after every value
pub const QC_UNFLAGGED: i64 = 0;

/// Header constants
pub const PLATFORM_CODE: &str = "FM-35 TEMP";
pub const SOURCE_NAME: &str = "WindBorne";

/// Unit conversions
pub const HPA_TO_PA: f64 = 100.0;
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Record widths
pub const HEADER_WIDTH: usize = 620;
pub const DATA_RECORD_WIDTH: usize = 200;

/// Closes the level data of a station
pub const END_RECORD: &str = "-777777.00000      0-777777.00000      0-888888.00000      0-888888.00000      0-888888.00000      0-888888.00000      0-888888.00000      0-888888.00000      0-888888.00000      0-888888.00000      0";

/// Valid field count, errors and warnings for the station
pub const TAIL_RECORD: &str = "     39      0      0";

/// Date layouts
pub const LITTLE_R_DATE_FORMAT: &str = "%Y%m%d%H%M%S";
pub const CLI_TIME_FORMAT: &str = "%Y-%m-%d_%H:%M";

/// File names
pub const LITTLE_R_EXTENSION: &str = "little_r";
pub const PAGE_EXTENSION: &str = "json";

/// Processing defaults
pub const DEFAULT_BUCKET_HOURS: f64 = 6.0;
pub const MIN_BUCKET_HOURS: f64 = 1.0;
pub const MAX_BUCKET_HOURS: f64 = 8784.0;
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const SECONDS_PER_HOUR: f64 = 3600.0;
