// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for log filters and identifiers)
pub const APP_NAME_LOWER: &str = "gridquery";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "GRIDQUERY_LOG";

/// Environment variable for the table definition file
pub const ENV_TABLE: &str = "GRIDQUERY_TABLE";

// =============================================================================
// Request Defaults
// =============================================================================

/// Page requested by the CLI when none is given
pub const DEFAULT_PAGE: i64 = 1;

/// Page size requested by the CLI when none is given
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Column used as the ordering tiebreak
pub const DEFAULT_PRIMARY_KEY: &str = "id";

// =============================================================================
// Dates
// =============================================================================

/// Date format accepted in filter values
pub const FILTER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Display format for timestamps
pub const DISPLAY_DATE_TIME_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// Time zone timestamps are displayed in
pub const DISPLAY_TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::Athens;
